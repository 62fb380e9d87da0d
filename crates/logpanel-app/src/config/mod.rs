//! Panel configuration
//!
//! - [`PanelSettings`] - typed user preferences
//! - [`SettingsStore`] - injected key-value storage
//! - [`TomlSettingsStore`] - `<config_dir>/logpanel/settings.toml`
//! - [`MemorySettingsStore`] - process-local storage

pub mod store;
pub mod types;

pub use store::{MemorySettingsStore, SettingValue, SettingsStore, TomlSettingsStore};
pub use types::{PanelSettings, SettingKey, DEFAULT_FONT_SIZE};
