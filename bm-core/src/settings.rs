//! Persisted key/value settings
//!
//! Nodes hold an `Arc<dyn Settings>` handed to them at construction. Keys are
//! flat strings such as `/mainboard/name`; values are the user's overrides.
//!
//! Two stores are provided:
//! - `MemorySettings`: process-local, used by tests and `--no-save` runs
//! - `JsonSettings`: a pretty-printed JSON map written atomically on every change

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::{limits, paths};
use crate::error::{BoardmonError, Result};

/// Get/set-by-key storage for user overrides
#[cfg_attr(test, mockall::automock)]
pub trait Settings: Send + Sync {
    /// Stored value for `key`, or `default` when none exists
    fn get_value(&self, key: &str, default: &str) -> String;

    /// Store `value` under `key`. One call is one logical write.
    fn set_value(&self, key: &str, value: &str) -> Result<()>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Settings for MemorySettings {
    fn get_value(&self, key: &str, default: &str) -> String {
        self.values
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// On-disk layout of the settings file
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug)]
pub struct JsonSettings {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl JsonSettings {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. A file that cannot be parsed is logged and
    /// also treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = load_values(&path)?;
        debug!(path = %path.display(), entries = values.len(), "Loaded settings");
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Open the store at the default location, creating the directory if needed
    pub fn open_default() -> Result<Self> {
        Self::open(default_settings_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomic write: temp file, fsync, rename
    fn save(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| BoardmonError::file_write(parent, e))?;
            }
        }

        let file = SettingsFile {
            version: default_version(),
            values: values.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut out = fs::File::create(&temp_path)
            .map_err(|e| BoardmonError::file_write(&temp_path, e))?;
        out.write_all(json.as_bytes())
            .map_err(|e| BoardmonError::file_write(&temp_path, e))?;
        out.sync_all()
            .map_err(|e| BoardmonError::file_write(&temp_path, e))?;
        drop(out);

        fs::rename(&temp_path, &self.path)
            .map_err(|e| BoardmonError::file_write(&self.path, e))?;
        Ok(())
    }
}

impl Settings for JsonSettings {
    fn get_value(&self, key: &str, default: &str) -> String {
        self.values
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        // Write lock held across the save; memory only changes once the file has
        let mut values = self.values.write();
        let mut candidate = values.clone();
        candidate.insert(key.to_string(), value.to_string());
        self.save(&candidate)?;
        *values = candidate;
        debug!(key, "Persisted setting");
        Ok(())
    }
}

fn load_values(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let size = fs::metadata(path)
        .map_err(|e| BoardmonError::file_read(path, e))?
        .len();
    if size > limits::MAX_SETTINGS_SIZE {
        warn!(path = %path.display(), size, "Settings file too large, ignoring");
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| BoardmonError::file_read(path, e))?;
    match serde_json::from_str::<SettingsFile>(&content) {
        Ok(file) => Ok(file.values),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse settings, starting empty");
            Ok(BTreeMap::new())
        }
    }
}

/// Resolve `<config dir>/settings.json`, creating the directory if needed
pub fn default_settings_path() -> Result<PathBuf> {
    let dir = paths::user_config_dir()
        .ok_or_else(|| BoardmonError::config("Could not determine config directory"))?;

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| {
            BoardmonError::config(format!("Failed to create config directory: {}", e))
        })?;
        info!(dir = %dir.display(), "Created config directory");
    }

    Ok(dir.join(paths::SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_settings_default_and_set() {
        let settings = MemorySettings::new();
        assert_eq!(settings.get_value("/mainboard/name", "fallback"), "fallback");

        settings.set_value("/mainboard/name", "Workstation").unwrap();
        assert_eq!(settings.get_value("/mainboard/name", "fallback"), "Workstation");
        assert_eq!(settings.get_value("/lpc/nct6798d/0/name", "fallback"), "fallback");
    }

    #[test]
    fn test_json_settings_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = JsonSettings::open(&path).unwrap();
        settings.set_value("/lpc/nct6798d/0/name", "Main SIO").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonSettings::open(&path).unwrap();
        assert_eq!(reopened.get_value("/lpc/nct6798d/0/name", ""), "Main SIO");
    }

    #[test]
    fn test_json_settings_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let settings = JsonSettings::open(&path).unwrap();
        assert_eq!(settings.get_value("/mainboard/name", "Unknown"), "Unknown");

        settings.set_value("/mainboard/name", "Rig").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"/mainboard/name\": \"Rig\""));
    }

    #[test]
    fn test_json_settings_failed_save_leaves_values_unchanged() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let settings = JsonSettings::open(blocker.join("settings.json")).unwrap();
        assert!(settings.set_value("/mainboard/name", "Rig").is_err());
        assert_eq!(settings.get_value("/mainboard/name", "DEFAULT"), "DEFAULT");
    }

    #[test]
    fn test_json_settings_failed_save_not_carried_into_next_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = JsonSettings::open(&path).unwrap();
        settings.set_value("/mainboard/name", "Rig").unwrap();

        // A directory squatting on the temp file path makes the next save fail
        let tmp = path.with_extension("json.tmp");
        fs::create_dir(&tmp).unwrap();
        assert!(settings.set_value("/lpc/it8688e/0/name", "Main SIO").is_err());
        assert_eq!(settings.get_value("/lpc/it8688e/0/name", "DEFAULT"), "DEFAULT");

        fs::remove_dir(&tmp).unwrap();
        settings.set_value("/mainboard/name", "Bench").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"/mainboard/name\": \"Bench\""));
        assert!(!content.contains("Main SIO"));
    }
}
