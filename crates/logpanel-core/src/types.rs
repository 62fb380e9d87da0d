//! Core domain type definitions

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique line IDs
static LINE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier of a parsed log line
///
/// IDs are unique across reloads, so a view can tell a re-read line from the
/// line it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    /// Allocate the next unused ID
    pub fn next() -> Self {
        Self(LINE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display color of a log line, derived from its severity tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineColor {
    Gray,
    #[default]
    Primary,
    Orange,
    Red,
}

/// Log severity levels
///
/// Used as a display threshold. A line's own severity is never stored; it is
/// inferred from the bracketed tag embedded in its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// All levels, least severe first
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// The bracketed tag the upstream logger writes for this level
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "[Debug]",
            LogLevel::Info => "[Info]",
            LogLevel::Warning => "[Warning]",
            LogLevel::Error => "[Error]",
        }
    }

    /// Color used for lines carrying this level's tag
    pub fn color(&self) -> LineColor {
        match self {
            LogLevel::Debug => LineColor::Gray,
            LogLevel::Info => LineColor::Primary,
            LogLevel::Warning => LineColor::Orange,
            LogLevel::Error => LineColor::Red,
        }
    }

    /// Persisted name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    /// Levels at or above this one, in ascending severity
    pub fn at_least(self) -> impl Iterator<Item = LogLevel> {
        LogLevel::ALL.into_iter().filter(move |level| *level >= self)
    }

    /// Check whether a line's text meets this threshold
    ///
    /// `Debug` admits every line, including untagged ones.
    pub fn admits(&self, text: &str) -> bool {
        if *self == LogLevel::Debug {
            return true;
        }
        self.at_least().any(|level| text.contains(level.tag()))
    }

    /// Detect the color of a line from the first matching tag, checked
    /// Debug→Info→Warning→Error
    pub fn detect_color(text: &str) -> LineColor {
        LogLevel::ALL
            .iter()
            .find(|level| text.contains(level.tag()))
            .map(LogLevel::color)
            .unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// How the filter text is matched against a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogFilter {
    /// No text filtering
    #[default]
    None,
    /// Keep lines containing the text
    Includes,
    /// Keep lines not containing the text
    Excludes,
    /// Keep lines containing `" > " + text` (a named logger sub-context)
    Prefix,
}

impl LogFilter {
    /// Delimiter the upstream logger writes before a sub-context name
    pub const PREFIX_DELIMITER: &'static str = " > ";

    /// Check if a line's text passes this filter
    ///
    /// Plain substring semantics: an empty `text` is contained in every line.
    pub fn matches(&self, line: &str, text: &str) -> bool {
        match self {
            LogFilter::None => true,
            LogFilter::Includes => line.contains(text),
            LogFilter::Excludes => !line.contains(text),
            LogFilter::Prefix => {
                let needle = format!("{}{}", Self::PREFIX_DELIMITER, text);
                line.contains(&needle)
            }
        }
    }

    /// Persisted name of the filter kind
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFilter::None => "none",
            LogFilter::Includes => "includes",
            LogFilter::Excludes => "excludes",
            LogFilter::Prefix => "prefix",
        }
    }
}

impl fmt::Display for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(LogFilter::None),
            "includes" => Ok(LogFilter::Includes),
            "excludes" => Ok(LogFilter::Excludes),
            "prefix" => Ok(LogFilter::Prefix),
            other => Err(format!("unknown log filter '{}'", other)),
        }
    }
}

/// A single line of a loaded log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub id: LineId,
    pub text: String,
    pub color: LineColor,
}

impl LogLine {
    /// Create a line, tagging it with the color of its first severity tag
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let color = LogLevel::detect_color(&text);
        Self {
            id: LineId::next(),
            text,
            color,
        }
    }

    /// Copy of this line showing only the text from the first `[` onward
    ///
    /// Drops a leading timestamp. Lines without `[` are returned unchanged.
    pub fn without_timestamp(&self) -> Self {
        let mut line = self.clone();
        if let Some(start) = line.text.find('[') {
            line.text = line.text[start..].to_string();
        }
        line
    }
}
