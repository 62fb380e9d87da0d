//! Key-value settings stores
//!
//! The panel never touches ambient global preferences. A [`SettingsStore`] is
//! handed to the controller at construction and every read and write goes
//! through it.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use logpanel_core::prelude::*;

const SETTINGS_FILENAME: &str = "settings.toml";
const LOGPANEL_DIR: &str = "logpanel";

/// A single stored preference value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Boolean(b) => Some(SettingValue::Bool(*b)),
            toml::Value::Float(f) => Some(SettingValue::Number(*f)),
            toml::Value::Integer(i) => Some(SettingValue::Number(*i as f64)),
            toml::Value::String(s) => Some(SettingValue::Text(s.clone())),
            _ => None,
        }
    }

    fn to_toml(&self) -> toml::Value {
        match self {
            SettingValue::Bool(b) => toml::Value::Boolean(*b),
            SettingValue::Number(n) => toml::Value::Float(*n),
            SettingValue::Text(s) => toml::Value::String(s.clone()),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// Synchronous, thread-safe key-value preference storage
pub trait SettingsStore: Send + Sync {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> Option<SettingValue>;

    /// Write a value
    fn set(&self, key: &str, value: SettingValue) -> Result<()>;

    /// Read a bool, falling back to `default` when missing or mistyped
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// Read a number, falling back to `default` when missing or mistyped
    fn get_number(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|v| v.as_number())
            .unwrap_or(default)
    }

    /// Read a string, falling back to `default` when missing or mistyped
    fn get_text(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Settings kept in process memory only
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, SettingValue>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: SettingValue) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::config("settings store lock poisoned"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TOML file store
// ─────────────────────────────────────────────────────────────────────────────

/// Settings persisted to a TOML file
///
/// The file is read once on open. Every `set` rewrites the whole file.
#[derive(Debug)]
pub struct TomlSettingsStore {
    path: PathBuf,
    values: Mutex<toml::Table>,
}

impl TomlSettingsStore {
    /// Default location: `<config_dir>/logpanel/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(LOGPANEL_DIR).join(SETTINGS_FILENAME))
    }

    /// Open the store at its default location
    pub fn open_default() -> Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| Error::config("No configuration directory available"))?;
        Ok(Self::open(path))
    }

    /// Open the store at `path`
    ///
    /// A missing file starts empty. An unparsable file is logged and ignored;
    /// it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_table(&path) {
            Ok(Some(table)) => {
                debug!("Loaded settings from {:?}", path);
                table
            }
            Ok(None) => {
                debug!("No settings file at {:?}, using defaults", path);
                toml::Table::new()
            }
            Err(e) => {
                warn!("{}", e);
                toml::Table::new()
            }
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, table: &toml::Table) -> Result<()> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .map_err(|e| Error::config(format!("Failed to create settings dir: {}", e)))?;
        }

        // Serialize writers from other processes sharing the same file
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(".settings.lock"))
            .map_err(|e| Error::config(format!("Failed to open settings lock: {}", e)))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| Error::config(format!("Failed to lock settings: {}", e)))?;

        let header = "# Log panel preferences\n# Written automatically on every change\n\n";
        let content = toml::to_string_pretty(table)
            .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
        let full_content = format!("{}{}", header, content);

        // Atomic write: write to temp, then rename
        let temp_path = dir.join(".settings.toml.tmp");
        std::fs::write(&temp_path, full_content)
            .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

        // Lock is released when lock_file is dropped
        trace!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

impl SettingsStore for TomlSettingsStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        let values = self.values.lock().ok()?;
        values.get(key).and_then(SettingValue::from_toml)
    }

    fn set(&self, key: &str, value: SettingValue) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::config("settings store lock poisoned"))?;
        values.insert(key.to_string(), value.to_toml());
        self.persist(&values)
    }
}

/// Read and parse the settings file, `Ok(None)` when it does not exist
fn read_table(path: &Path) -> Result<Option<toml::Table>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| Error::settings_parse(path, e))?;
    let table = toml::from_str::<toml::Table>(&content)
        .map_err(|e| Error::settings_parse(path, e))?;
    Ok(Some(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySettingsStore::new();
        assert!(store.is_empty());
        store.set("gotoLast", SettingValue::Bool(false)).unwrap();
        assert_eq!(store.get("gotoLast"), Some(SettingValue::Bool(false)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_typed_getters_fall_back_to_default() {
        let store = MemorySettingsStore::new();
        assert!(store.get_bool("showTimestamps", true));
        assert_eq!(store.get_number("fontSize", 12.0), 12.0);
        assert_eq!(store.get_text("logFilterText", "abc"), "abc");
    }

    #[test]
    fn test_typed_getters_ignore_mistyped_values() {
        let store = MemorySettingsStore::new();
        store.set("fontSize", "huge".into()).unwrap();
        assert_eq!(store.get_number("fontSize", 12.0), 12.0);
    }

    #[test]
    fn test_toml_store_missing_file_is_empty() {
        let temp = tempdir().unwrap();
        let store = TomlSettingsStore::open(temp.path().join("settings.toml"));
        assert_eq!(store.get("logLevel"), None);
    }

    #[test]
    fn test_toml_store_persists_across_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("settings.toml");

        let store = TomlSettingsStore::open(&path);
        store.set("logLevel", "warning".into()).unwrap();
        store.set("fontSize", 14.5.into()).unwrap();
        store.set("autoRefresh", true.into()).unwrap();
        drop(store);

        let reopened = TomlSettingsStore::open(&path);
        assert_eq!(reopened.get_text("logLevel", "debug"), "warning");
        assert_eq!(reopened.get_number("fontSize", 0.0), 14.5);
        assert!(reopened.get_bool("autoRefresh", false));
        assert!(!temp.path().join("nested/.settings.toml.tmp").exists());
    }

    #[test]
    fn test_toml_store_reads_integer_as_number() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "fontSize = 13\n").unwrap();

        let store = TomlSettingsStore::open(&path);
        assert_eq!(store.get("fontSize"), Some(SettingValue::Number(13.0)));
    }

    #[test]
    fn test_toml_store_invalid_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        let store = TomlSettingsStore::open(&path);
        assert_eq!(store.get("logLevel"), None);

        // Next write replaces the broken file
        store.set("gotoLast", false.into()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("gotoLast = false"));
    }

    #[test]
    fn test_read_table_reports_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.toml");
        std::fs::write(&path, "= nope").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, Error::SettingsParse { .. }));
    }
}
