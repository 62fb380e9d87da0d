//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in:
//! - `load`: Appear/Load/tick handling and file read results
//! - `save`: Save dialog and write results
//! - `settings`: Filter and display preference changes

use tracing::debug;

use crate::message::Message;
use crate::state::PanelState;

use super::{load, save, settings, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut PanelState, message: Message) -> UpdateResult {
    match message {
        Message::Appear => load::handle_appear(state),

        // ─────────────────────────────────────────────────────────
        // User Actions
        // ─────────────────────────────────────────────────────────
        Message::ToggleAutoRefresh => {
            state.auto_refresh_active = !state.auto_refresh_active;
            state.settings.auto_refresh = state.auto_refresh_active;
            debug!(
                "Auto-refresh {}",
                if state.auto_refresh_active { "enabled" } else { "disabled" }
            );
            if state.auto_refresh_active {
                UpdateResult::action(UpdateAction::StartAutoRefresh)
            } else {
                UpdateResult::action(UpdateAction::StopAutoRefresh)
            }
        }

        Message::Clear => {
            state.clear_display();
            UpdateResult::none()
        }

        Message::Load => load::handle_load(state),

        Message::Save => save::handle_save(state),

        Message::ToggleGotoLast => {
            state.settings.goto_last = !state.settings.goto_last;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Filter Settings
        // ─────────────────────────────────────────────────────────
        Message::SetFilterKind(kind) => settings::handle_set_filter_kind(state, kind),
        Message::SetFilterText(text) => settings::handle_set_filter_text(state, text),
        Message::SetLevel(level) => settings::handle_set_level(state, level),
        Message::SetShowTimestamps(show) => settings::handle_set_show_timestamps(state, show),
        Message::SetFontSize(size) => settings::handle_set_font_size(state, size),

        // ─────────────────────────────────────────────────────────
        // Auto-Refresh
        // ─────────────────────────────────────────────────────────
        Message::AutoRefreshTick => load::handle_auto_refresh_tick(state),

        // ─────────────────────────────────────────────────────────
        // Effect Results
        // ─────────────────────────────────────────────────────────
        Message::FileOpened { path } => load::handle_file_opened(state, path),
        Message::LinesLoaded { path, lines } => load::handle_lines_loaded(state, path, lines),
        Message::LoadFailed { path, error } => load::handle_load_failed(state, path, error),
        Message::SaveTargetPicked { path } => save::handle_save_target_picked(state, path),
        Message::SaveCompleted { path, line_count } => {
            save::handle_save_completed(state, path, line_count)
        }
        Message::SaveFailed { path, error } => save::handle_save_failed(state, path, error),
    }
}
