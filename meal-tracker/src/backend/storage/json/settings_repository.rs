//! # Settings Repository
//!
//! A tiny key-value preference store: one YAML map of string keys to
//! integers in `settings.yaml`. Goals are its only tenants today.
//!
//! ```yaml
//! calorie_goal: 2300
//! protein_goal: 150
//! ```

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use super::connection::{write_atomically, JsonConnection};
use crate::backend::storage::error::StorageError;
use crate::backend::storage::traits::SettingsStorage;

type SettingsMap = BTreeMap<String, i64>;

const CORRUPT_BACKUP_EXTENSION: &str = "yaml.corrupt";

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    connection: JsonConnection,
}

impl SettingsRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// A missing or blank file is an empty map; an undecodable one is `Corrupt`
    fn load_settings(&self) -> Result<SettingsMap, StorageError> {
        let path = self.connection.settings_file_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SettingsMap::new()),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(SettingsMap::new());
        }

        serde_yaml::from_str(&contents).map_err(|e| StorageError::Corrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Keeps the undecodable file next to the original before it is overwritten
    fn preserve_corrupt_settings(&self) -> Result<PathBuf, StorageError> {
        let path = self.connection.settings_file_path();
        let backup = path.with_extension(CORRUPT_BACKUP_EXTENSION);
        fs::copy(&path, &backup).map_err(|e| StorageError::io(&backup, e))?;
        Ok(backup)
    }

    fn write_settings(&self, settings: &SettingsMap) -> Result<(), StorageError> {
        let path = self.connection.settings_file_path();
        let yaml = serde_yaml::to_string(settings).map_err(|e| StorageError::Encode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        write_atomically(&path, yaml.as_bytes())
    }
}

impl SettingsStorage for SettingsRepository {
    /// Unreadable settings fall back to in-process defaults
    fn get_int(&self, key: &str) -> Result<Option<i64>, StorageError> {
        match self.load_settings() {
            Ok(settings) => Ok(settings.get(key).copied()),
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Ok(None)
            }
        }
    }

    fn set_int(&self, key: &str, value: i64) -> Result<(), StorageError> {
        let mut settings = match self.load_settings() {
            Ok(settings) => settings,
            Err(e @ StorageError::Corrupt { .. }) => {
                let backup = self.preserve_corrupt_settings()?;
                warn!("{}. Saved a copy to {} and starting from empty settings.", e, backup.display());
                SettingsMap::new()
            }
            Err(e) => return Err(e),
        };
        settings.insert(key.to_string(), value);
        self.write_settings(&settings)?;
        debug!("Set setting {} = {}", key, value);
        Ok(())
    }
}
