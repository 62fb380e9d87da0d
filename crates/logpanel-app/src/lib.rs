//! logpanel-app - State and orchestration for the log panel
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the panel:
//! messages are reduced by `handler::update()`, side effects (file reads and
//! writes, dialogs, the auto-refresh timer) are executed by [`LogController`],
//! and preferences are persisted through an injected [`SettingsStore`].

pub mod auto_refresh;
pub mod config;
pub mod controller;
pub mod controller_event;
pub mod filter;
pub mod handler;
pub mod loader;
pub mod message;
pub mod picker;
pub mod state;

// Re-export primary types
pub use auto_refresh::{AutoRefreshHandle, AUTO_REFRESH_INTERVAL};
pub use config::{MemorySettingsStore, PanelSettings, SettingValue, SettingsStore, TomlSettingsStore};
pub use controller::LogController;
pub use controller_event::ControllerEvent;
pub use filter::{filter_lines, FilterSettings};
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use picker::{FilePicker, NoFilePicker};
pub use state::PanelState;

// Re-export core types for hosts
pub use logpanel_core::{LineColor, LogFilter, LogLevel, LogLine};
