//! Settings handlers
//!
//! Filter inputs recompute the displayed lines from the unchanged loaded
//! lines. Persisting the new values is left to the controller.

use logpanel_core::{LogFilter, LogLevel};

use crate::state::PanelState;

use super::UpdateResult;

pub fn handle_set_filter_kind(state: &mut PanelState, kind: LogFilter) -> UpdateResult {
    tracing::debug!("Filter kind: {}", kind);
    state.settings.filter_kind = kind;
    state.recompute_filter();
    UpdateResult::none()
}

pub fn handle_set_filter_text(state: &mut PanelState, text: String) -> UpdateResult {
    state.settings.filter_text = text;
    state.recompute_filter();
    UpdateResult::none()
}

pub fn handle_set_level(state: &mut PanelState, level: LogLevel) -> UpdateResult {
    tracing::debug!("Level threshold: {}", level);
    state.settings.level = level;
    state.recompute_filter();
    UpdateResult::none()
}

pub fn handle_set_show_timestamps(state: &mut PanelState, show: bool) -> UpdateResult {
    state.settings.show_timestamps = show;
    state.recompute_filter();
    UpdateResult::none()
}

/// Font size only affects rendering
pub fn handle_set_font_size(state: &mut PanelState, size: f64) -> UpdateResult {
    if !size.is_finite() || size <= 0.0 {
        tracing::warn!("Ignoring invalid font size {}", size);
        return UpdateResult::none();
    }
    state.settings.font_size = size;
    UpdateResult::none()
}
