//! # logpanel-core - Core Domain Types
//!
//! Foundation crate for the log panel. Provides domain types, error handling
//! and logging setup.
//!
//! This crate has no internal dependencies. Besides thiserror and
//! tracing it only pulls in the subscriber stack used by [`logging::init`].
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LogLine`] - A single loaded line with its tag-derived color
//! - [`LineColor`] - Display color (Gray, Primary, Orange, Red)
//! - [`LogLevel`] - Severity threshold (Debug, Info, Warning, Error)
//! - [`LogFilter`] - Text matching mode (None, Includes, Excludes, Prefix)
//!
//! ### Logging (`logging`)
//! - [`logging::init`] - Daily rolling log file filtered by `LOGPANEL_LOG`
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use logpanel_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use types::{LineColor, LineId, LogFilter, LogLevel, LogLine};
