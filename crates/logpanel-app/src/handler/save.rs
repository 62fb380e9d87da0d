//! Save handlers
//!
//! The displayed lines are what gets written, not the loaded ones.

use std::path::PathBuf;

use crate::state::PanelState;

use super::{UpdateAction, UpdateResult};

/// Handle the save request by asking for a target file
pub fn handle_save(state: &mut PanelState) -> UpdateResult {
    UpdateResult::action(UpdateAction::PickFileToSave {
        start_dir: state.start_directory(),
        default_name: state.default_save_name(),
    })
}

/// Handle the save dialog closing
pub fn handle_save_target_picked(state: &mut PanelState, path: Option<PathBuf>) -> UpdateResult {
    match path {
        Some(path) => UpdateResult::action(UpdateAction::WriteFile {
            path,
            lines: state.filtered_lines.clone(),
        }),
        None => {
            tracing::debug!("Save dialog canceled");
            UpdateResult::none()
        }
    }
}

pub fn handle_save_completed(
    state: &mut PanelState,
    path: PathBuf,
    line_count: usize,
) -> UpdateResult {
    state.status = Some(format!("Saved {} lines to {}", line_count, path.display()));
    state.last_error = None;
    UpdateResult::none()
}

pub fn handle_save_failed(state: &mut PanelState, path: PathBuf, error: String) -> UpdateResult {
    tracing::error!("Failed to save {}: {}", path.display(), error);
    state.status = Some(format!("Save failed: {}", error));
    state.last_error = Some(error);
    UpdateResult::none()
}
