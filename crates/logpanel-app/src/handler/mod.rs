//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `load`: Appear/Load/tick handling and file read results
//! - `save`: Save dialog and write results
//! - `settings`: Filter and display preference changes

pub(crate) mod load;
pub(crate) mod save;
pub(crate) mod settings;
pub(crate) mod update;


use std::path::PathBuf;

use logpanel_core::LogLine;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Side effects the controller performs after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Read `path` and answer with `LinesLoaded` or `LoadFailed`
    LoadFile { path: PathBuf },

    /// Show the open dialog and answer with `FileOpened`
    PickFileToOpen { start_dir: PathBuf },

    /// Show the save dialog and answer with `SaveTargetPicked`
    PickFileToSave {
        start_dir: PathBuf,
        default_name: String,
    },

    /// Write `lines` to `path` and answer with `SaveCompleted` or `SaveFailed`
    WriteFile { path: PathBuf, lines: Vec<LogLine> },

    /// Start the auto-refresh task, replacing any running one
    StartAutoRefresh,

    /// Cancel the auto-refresh task
    StopAutoRefresh,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the controller to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
