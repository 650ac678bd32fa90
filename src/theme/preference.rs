//! Durable key-value storage for the color scheme preference.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use super::error::ThemeError;
use super::scheme::ColorSchemeSetting;

/// Fixed key the scheme setting is stored under.
pub const PREFERENCE_KEY: &str = "website-theme-preference";

/// Minimal durable store.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// Read a stored setting. Absent, unreadable and invalid values are all `None`.
pub fn read_stored_scheme(store: &dyn PreferenceStore, key: &str) -> Option<ColorSchemeSetting> {
    match store.get(key) {
        Ok(value) => value.as_deref().and_then(ColorSchemeSetting::from_stored),
        Err(e) => {
            crate::debug!("theme"; "ignoring unreadable preference: {}", e);
            None
        }
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Preferences persisted as a flat JSON object.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, ThemeError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(ThemeError::Io(self.path.clone(), e)),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ThemeError::Preference(format!(
                "`{}` is not a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(ThemeError::Preference(format!(
                "`{}`: {e}",
                self.path.display()
            ))),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        let _guard = self.lock.lock();
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        let _guard = self.lock.lock();
        // A corrupt file is replaced rather than blocking the write; a file
        // that cannot be read is left alone.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(ThemeError::Preference(_)) => Map::new(),
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ThemeError::Io(parent.to_path_buf(), e))?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| ThemeError::Preference(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| ThemeError::Io(self.path.clone(), e))
    }
}
