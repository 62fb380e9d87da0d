//! Message types for the panel (TEA pattern)

use std::path::PathBuf;

use logpanel_core::{LogFilter, LogLevel, LogLine};

/// All possible messages/actions in the panel
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // View Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The panel became visible
    Appear,

    // ─────────────────────────────────────────────────────────
    // User Actions
    // ─────────────────────────────────────────────────────────
    /// Flip periodic reloading on or off
    ToggleAutoRefresh,
    /// Empty the displayed lines (loaded lines are kept)
    Clear,
    /// Reload the current file, or pick one if none is selected
    Load,
    /// Write the displayed lines to a new file
    Save,
    /// Keep the view anchored to the last line (or stop doing so)
    ToggleGotoLast,

    // ─────────────────────────────────────────────────────────
    // Filter Settings
    // ─────────────────────────────────────────────────────────
    SetFilterKind(LogFilter),
    SetFilterText(String),
    SetLevel(LogLevel),
    SetShowTimestamps(bool),
    SetFontSize(f64),

    // ─────────────────────────────────────────────────────────
    // Auto-Refresh
    // ─────────────────────────────────────────────────────────
    /// Periodic reload from the auto-refresh task
    AutoRefreshTick,

    // ─────────────────────────────────────────────────────────
    // Effect Results
    // ─────────────────────────────────────────────────────────
    /// Open dialog closed; `None` when canceled
    FileOpened { path: Option<PathBuf> },
    /// File read succeeded
    LinesLoaded { path: PathBuf, lines: Vec<LogLine> },
    /// File read failed; state is left as it was
    LoadFailed { path: PathBuf, error: String },
    /// Save dialog closed; `None` when canceled
    SaveTargetPicked { path: Option<PathBuf> },
    /// Filtered lines were written
    SaveCompleted { path: PathBuf, line_count: usize },
    /// Writing the filtered lines failed
    SaveFailed { path: PathBuf, error: String },
}
