//! Typed panel preferences

use logpanel_core::prelude::*;
use logpanel_core::{LogFilter, LogLevel};

use super::store::{SettingValue, SettingsStore};

/// Default font size of the log view, in points
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Keys under which panel preferences are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ShowTimestamps,
    LogLevel,
    LogFilter,
    LogFilterText,
    FontSize,
    AutoRefresh,
    GotoLast,
}

impl SettingKey {
    pub const ALL: [SettingKey; 7] = [
        SettingKey::ShowTimestamps,
        SettingKey::LogLevel,
        SettingKey::LogFilter,
        SettingKey::LogFilterText,
        SettingKey::FontSize,
        SettingKey::AutoRefresh,
        SettingKey::GotoLast,
    ];

    /// Store key name
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ShowTimestamps => "showTimestamps",
            SettingKey::LogLevel => "logLevel",
            SettingKey::LogFilter => "logFilter",
            SettingKey::LogFilterText => "logFilterText",
            SettingKey::FontSize => "fontSize",
            SettingKey::AutoRefresh => "autoRefresh",
            SettingKey::GotoLast => "gotoLast",
        }
    }
}

/// User preferences of the log panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSettings {
    /// Show the text before the first `[` (usually a timestamp)
    pub show_timestamps: bool,
    /// Minimum severity shown
    pub level: LogLevel,
    /// How `filter_text` is matched
    pub filter_kind: LogFilter,
    pub filter_text: String,
    pub font_size: f64,
    /// Reload the file every second
    pub auto_refresh: bool,
    /// Keep the view anchored to the last line
    pub goto_last: bool,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            level: LogLevel::Debug,
            filter_kind: LogFilter::None,
            filter_text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            auto_refresh: false,
            goto_last: true,
        }
    }
}

impl PanelSettings {
    /// Read all preferences from `store`, using defaults for missing or
    /// unparsable values
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();

        let level = parse_or_default(store, SettingKey::LogLevel, defaults.level);
        let filter_kind = parse_or_default(store, SettingKey::LogFilter, defaults.filter_kind);

        Self {
            show_timestamps: store.get_bool(
                SettingKey::ShowTimestamps.as_str(),
                defaults.show_timestamps,
            ),
            level,
            filter_kind,
            filter_text: store.get_text(
                SettingKey::LogFilterText.as_str(),
                &defaults.filter_text,
            ),
            font_size: store.get_number(SettingKey::FontSize.as_str(), defaults.font_size),
            auto_refresh: store.get_bool(SettingKey::AutoRefresh.as_str(), defaults.auto_refresh),
            goto_last: store.get_bool(SettingKey::GotoLast.as_str(), defaults.goto_last),
        }
    }

    /// Current value of one preference in store form
    pub fn value_of(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::ShowTimestamps => self.show_timestamps.into(),
            SettingKey::LogLevel => self.level.as_str().into(),
            SettingKey::LogFilter => self.filter_kind.as_str().into(),
            SettingKey::LogFilterText => self.filter_text.clone().into(),
            SettingKey::FontSize => self.font_size.into(),
            SettingKey::AutoRefresh => self.auto_refresh.into(),
            SettingKey::GotoLast => self.goto_last.into(),
        }
    }

    /// Keys whose values differ from `previous`
    pub fn changed_keys(&self, previous: &PanelSettings) -> Vec<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .filter(|key| self.value_of(*key) != previous.value_of(*key))
            .collect()
    }

    /// Write the preferences that differ from `previous`
    ///
    /// Every key is attempted; the first failure is returned.
    pub fn persist_changes(&self, previous: &PanelSettings, store: &dyn SettingsStore) -> Result<()> {
        let mut first_error = None;
        for key in self.changed_keys(previous) {
            debug!("Persisting setting {}", key.as_str());
            if let Err(e) = store.set(key.as_str(), self.value_of(key)) {
                warn!("Failed to persist setting {}: {}", key.as_str(), e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn parse_or_default<T>(store: &dyn SettingsStore, key: SettingKey, default: T) -> T
where
    T: std::str::FromStr<Err = String>,
{
    match store.get(key.as_str()).as_ref().and_then(SettingValue::as_text) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring stored {}: {}", key.as_str(), e);
            default
        }),
        None => default,
    }
}
