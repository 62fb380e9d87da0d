//! Panel error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Panel error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Log File Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read log file {}: {reason}", .path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error("Failed to write log file {}: {reason}", .path.display())]
    FileWrite { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse settings file {}: {reason}", .path.display())]
    SettingsParse { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn file_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FileWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn settings_parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SettingsParse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Load and save failures leave the panel state untouched, so the user
    /// can simply retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. }
                | Error::FileWrite { .. }
                | Error::SettingsParse { .. }
                | Error::ChannelSend { .. }
        )
    }

    /// Check if this error should tear down the controller
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ChannelClosed)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::file_read("/var/log/app.log", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Failed to read log file /var/log/app.log: No such file or directory"
        );

        let err = Error::file_write("/tmp/out.log", "Permission denied");
        assert!(err.to_string().contains("Permission denied"));
        assert!(err.to_string().contains("/tmp/out.log"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::ChannelClosed.is_fatal());
        assert!(!Error::file_read("/x", "gone").is_fatal());
        assert!(!Error::config("bad").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::file_read("/x", "gone").is_recoverable());
        assert!(Error::file_write("/x", "denied").is_recoverable());
        assert!(Error::settings_parse("/x", "expected value").is_recoverable());
        assert!(!Error::ChannelClosed.is_recoverable());
    }

    #[test]
    fn test_error_constructors() {
        let _ = Error::config("test");
        let _ = Error::channel_send("test");
        let _ = Error::settings_parse("/test/settings.toml", "test");
    }

    #[test]
    fn test_result_ext_preserves_error() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let result = io.context("Opening log");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
