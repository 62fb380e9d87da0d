//! Panel state (Model in TEA pattern)

use std::path::{Path, PathBuf};

use logpanel_core::LogLine;

use crate::config::PanelSettings;
use crate::filter::{filter_lines, FilterSettings};

/// Suggested file name when saving with no source selected
const DEFAULT_SAVE_NAME: &str = "filtered.log";

/// Complete panel state
#[derive(Debug, Clone)]
pub struct PanelState {
    /// File the lines were loaded from
    pub source_path: Option<PathBuf>,

    /// Lines as read from disk; the source of truth
    pub raw_lines: Vec<LogLine>,

    /// Lines for display, derived from `raw_lines` and `settings`
    pub filtered_lines: Vec<LogLine>,

    /// Whether the auto-refresh task should be running
    pub auto_refresh_active: bool,

    /// User preferences (persisted by the controller)
    pub settings: PanelSettings,

    /// Short message for a status line
    pub status: Option<String>,

    /// Last load or save failure, cleared by the next success
    pub last_error: Option<String>,

    /// Successful loads since creation
    pub reload_count: u64,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(PanelSettings::default())
    }
}

impl PanelState {
    pub fn new(settings: PanelSettings) -> Self {
        Self {
            source_path: None,
            raw_lines: Vec::new(),
            filtered_lines: Vec::new(),
            auto_refresh_active: false,
            settings,
            status: None,
            last_error: None,
            reload_count: 0,
        }
    }

    /// Current inputs of the filter pipeline
    pub fn filter_settings(&self) -> FilterSettings {
        FilterSettings::from(&self.settings)
    }

    /// Rebuild `filtered_lines` from scratch
    pub fn recompute_filter(&mut self) {
        self.filtered_lines = filter_lines(&self.raw_lines, &self.filter_settings());
    }

    /// Replace the loaded lines and refilter
    pub fn replace_lines(&mut self, lines: Vec<LogLine>) {
        self.raw_lines = lines;
        self.recompute_filter();
    }

    /// Display-only clear; loaded lines are kept
    pub fn clear_display(&mut self) {
        self.filtered_lines.clear();
    }

    /// Get total and visible line counts
    pub fn line_counts(&self) -> (usize, usize) {
        (self.raw_lines.len(), self.filtered_lines.len())
    }

    /// Directory the file dialogs open in
    ///
    /// The current file's directory, else the home directory.
    pub fn start_directory(&self) -> PathBuf {
        self.source_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Suggested name for saving the filtered view
    ///
    /// `app.log` becomes `app-filtered.log`.
    pub fn default_save_name(&self) -> String {
        let Some(path) = self.source_path.as_deref() else {
            return DEFAULT_SAVE_NAME.to_string();
        };
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
            return DEFAULT_SAVE_NAME.to_string();
        };
        match path.extension() {
            Some(ext) => format!("{}-filtered.{}", stem, ext.to_string_lossy()),
            None => format!("{}-filtered", stem),
        }
    }
}
