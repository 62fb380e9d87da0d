//! File picker capability
//!
//! Open and save dialogs belong to the host UI. The controller only sees this
//! trait; a blocking modal dialog is a valid implementation.

use std::path::{Path, PathBuf};

/// Native "choose a file" dialogs
#[cfg_attr(test, mockall::automock)]
pub trait FilePicker: Send + Sync {
    /// Ask the user for a log file to read, `None` if they cancel
    fn pick_file_to_open(&self, start_dir: &Path) -> Option<PathBuf>;

    /// Ask the user where to write a file, `None` if they cancel
    fn pick_file_to_save(&self, start_dir: &Path, default_name: &str) -> Option<PathBuf>;
}

/// Picker for hosts without dialogs; every request is canceled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFilePicker;

impl FilePicker for NoFilePicker {
    fn pick_file_to_open(&self, _start_dir: &Path) -> Option<PathBuf> {
        None
    }

    fn pick_file_to_save(&self, _start_dir: &Path, _default_name: &str) -> Option<PathBuf> {
        None
    }
}
