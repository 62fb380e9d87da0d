//! Load handlers
//!
//! Handles Appear, Load, auto-refresh ticks and the results of file reads.

use std::path::PathBuf;

use logpanel_core::LogLine;

use crate::state::PanelState;

use super::{UpdateAction, UpdateResult};

/// Handle the panel becoming visible
///
/// With the persisted auto-refresh preference on, starting the task is
/// enough: its first tick loads the file.
pub fn handle_appear(state: &mut PanelState) -> UpdateResult {
    if state.settings.auto_refresh && !state.auto_refresh_active {
        tracing::debug!("Resuming auto-refresh on appear");
        state.auto_refresh_active = true;
        return UpdateResult::action(UpdateAction::StartAutoRefresh);
    }

    match state.source_path.clone() {
        Some(path) => UpdateResult::action(UpdateAction::LoadFile { path }),
        None => {
            state.replace_lines(Vec::new());
            UpdateResult::none()
        }
    }
}

/// Handle a reload request
///
/// Without a file, asks the user to pick one first.
pub fn handle_load(state: &mut PanelState) -> UpdateResult {
    match state.source_path.clone() {
        Some(path) => UpdateResult::action(UpdateAction::LoadFile { path }),
        None => UpdateResult::action(UpdateAction::PickFileToOpen {
            start_dir: state.start_directory(),
        }),
    }
}

/// Handle a periodic reload
///
/// Same as Load, except a tick never opens a dialog.
pub fn handle_auto_refresh_tick(state: &mut PanelState) -> UpdateResult {
    if !state.auto_refresh_active {
        tracing::trace!("Dropping tick from a canceled auto-refresh");
        return UpdateResult::none();
    }
    match state.source_path.clone() {
        Some(path) => UpdateResult::action(UpdateAction::LoadFile { path }),
        None => {
            tracing::trace!("Auto-refresh tick with no file selected");
            UpdateResult::none()
        }
    }
}

/// Handle the open dialog closing
pub fn handle_file_opened(state: &mut PanelState, path: Option<PathBuf>) -> UpdateResult {
    match path {
        Some(path) => {
            tracing::info!("Selected log file {}", path.display());
            state.source_path = Some(path.clone());
            UpdateResult::action(UpdateAction::LoadFile { path })
        }
        None => {
            tracing::debug!("Open dialog canceled");
            state.clear_display();
            UpdateResult::none()
        }
    }
}

/// Handle a successful file read
pub fn handle_lines_loaded(
    state: &mut PanelState,
    path: PathBuf,
    lines: Vec<LogLine>,
) -> UpdateResult {
    if state.source_path.as_ref() != Some(&path) {
        tracing::debug!("Ignoring lines from stale source {}", path.display());
        return UpdateResult::none();
    }

    state.replace_lines(lines);
    state.reload_count += 1;
    state.last_error = None;

    let (total, visible) = state.line_counts();
    state.status = Some(format!("{} of {} lines", visible, total));
    UpdateResult::none()
}

/// Handle a failed file read
///
/// Loaded and displayed lines stay as they were.
pub fn handle_load_failed(state: &mut PanelState, path: PathBuf, error: String) -> UpdateResult {
    tracing::warn!("Failed to load {}: {}", path.display(), error);
    state.status = Some(format!("Load failed: {}", error));
    state.last_error = Some(error);
    UpdateResult::none()
}
