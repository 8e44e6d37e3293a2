//! Process-wide key-value settings backends

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// A durable key-value store addressed by named slots.
///
/// Every value is replaced whole; there are no partial updates.
pub trait SettingsStore: Send + Sync {
    /// Read the value stored in `slot`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or parsed.
    fn get(&self, slot: &str) -> Result<Option<Value>>;

    /// Replace the value stored in `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, slot: &str, value: Value) -> Result<()>;
}

/// Settings kept in a single JSON object file.
///
/// Writes go through a sibling temp file that is renamed over the target,
/// so a reader never observes a half-written file. Unrelated slots are
/// preserved on every write.
#[derive(Debug)]
pub struct JsonSettings {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSettings {
    /// Settings stored at an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Settings in the platform config directory, e.g.
    /// `~/Library/Application Support/<app>/settings.json` on macOS.
    #[must_use]
    pub fn default_location(app_name: &str) -> Option<Self> {
        dirs::config_dir().map(|p| Self::new(p.join(app_name).join("settings.json")))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, all: &Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, all)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, slot: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(slot))
    }

    fn set(&self, slot: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut all = match self.read_all() {
            Ok(all) => all,
            Err(Error::Json(e)) => {
                tracing::warn!("Rewriting unreadable settings file {}: {}", self.path.display(), e);
                Map::new()
            }
            Err(e) => return Err(e),
        };
        all.insert(slot.to_string(), value);
        self.write_all(&all)
    }
}

/// In-memory settings, lost when dropped.
#[derive(Debug, Default)]
pub struct MemorySettings {
    slots: Mutex<HashMap<String, Value>>,
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, slot: &str) -> Result<Option<Value>> {
        Ok(self.slots.lock().get(slot).cloned())
    }

    fn set(&self, slot: &str, value: Value) -> Result<()> {
        self.slots.lock().insert(slot.to_string(), value);
        Ok(())
    }
}
