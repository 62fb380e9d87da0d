//! Events emitted by the controller for view consumers
//!
//! Events are broadcast after each processed message via
//! `LogController::subscribe()`, so subscribers see a consistent view of the
//! state changes.

use std::path::PathBuf;

use crate::message::Message;

/// Observable outcome of processing a message
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    // ─────────────────────────────────────────────────────────
    // Lines
    // ─────────────────────────────────────────────────────────
    /// Loaded or displayed lines changed
    LinesChanged { total: usize, visible: usize },

    /// A file read failed; lines were left as they were
    LoadFailed { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────
    // Save
    // ─────────────────────────────────────────────────────────
    /// The displayed lines were written to `path`
    Saved { path: PathBuf, line_count: usize },

    /// Writing the displayed lines failed
    SaveFailed { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────
    // Auto-Refresh
    // ─────────────────────────────────────────────────────────
    AutoRefreshChanged { active: bool },

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Controller is shutting down
    Shutdown,
}

impl ControllerEvent {
    /// Event reported by an effect-result message, if any
    pub(crate) fn from_result(msg: &Message) -> Option<Self> {
        match msg {
            Message::LoadFailed { path, error } => Some(Self::LoadFailed {
                path: path.clone(),
                error: error.clone(),
            }),
            Message::SaveCompleted { path, line_count } => Some(Self::Saved {
                path: path.clone(),
                line_count: *line_count,
            }),
            Message::SaveFailed { path, error } => Some(Self::SaveFailed {
                path: path.clone(),
                error: error.clone(),
            }),
            _ => None,
        }
    }

    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::LinesChanged { .. } => "lines_changed",
            Self::LoadFailed { .. } => "load_failed",
            Self::Saved { .. } => "saved",
            Self::SaveFailed { .. } => "save_failed",
            Self::AutoRefreshChanged { .. } => "auto_refresh_changed",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels() {
        assert_eq!(ControllerEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            ControllerEvent::LinesChanged {
                total: 2,
                visible: 1
            }
            .event_type(),
            "lines_changed"
        );
        assert_eq!(
            ControllerEvent::AutoRefreshChanged { active: true }.event_type(),
            "auto_refresh_changed"
        );
    }

    #[test]
    fn test_result_messages_map_to_events() {
        let msg = Message::SaveCompleted {
            path: PathBuf::from("/tmp/out.log"),
            line_count: 3,
        };
        assert_eq!(
            ControllerEvent::from_result(&msg),
            Some(ControllerEvent::Saved {
                path: PathBuf::from("/tmp/out.log"),
                line_count: 3
            })
        );

        let msg = Message::LoadFailed {
            path: PathBuf::from("/missing.log"),
            error: "gone".to_string(),
        };
        assert_eq!(
            ControllerEvent::from_result(&msg).map(|e| e.event_type()),
            Some("load_failed")
        );
    }

    #[test]
    fn test_user_messages_have_no_result_event() {
        assert!(ControllerEvent::from_result(&Message::Clear).is_none());
        assert!(ControllerEvent::from_result(&Message::AutoRefreshTick).is_none());
        assert!(ControllerEvent::from_result(&Message::SaveTargetPicked { path: None }).is_none());
    }
}
