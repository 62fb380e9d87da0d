//! Logging configuration using tracing
//!
//! The panel is embedded in a host application, so installing the global
//! subscriber is opt-in and fails cleanly when the host already has one.

use std::path::{Path, PathBuf};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "LOGPANEL_LOG";

/// Prefix of the daily log files (`logpanel.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "logpanel.log";

/// Filter used when `LOGPANEL_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "logpanel_core=info,logpanel_app=info,warn";

/// Initialize logging into the default log directory
///
/// Logs are written to `<data_local_dir>/logpanel/logs/`.
/// Log level is controlled by the `LOGPANEL_LOG` environment variable.
///
/// # Examples
/// ```bash
/// LOGPANEL_LOG=debug my-host-app
/// LOGPANEL_LOG=logpanel_app=trace my-host-app
/// ```
pub fn init() -> Result<()> {
    init_in(&log_directory())
}

/// Initialize logging into `log_dir`, rotating daily
pub fn init_in(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install log subscriber: {}", e)))?;

    tracing::info!("Log panel logging to {}", log_dir.display());
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Directory the log files are written to by [`init`]
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logpanel")
        .join("logs")
}
