use anyhow::Result;
use directories::ProjectDirs;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::backend::storage::error::StorageError;

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "MEAL_TRACKER_DATA_DIR";

const ENTRIES_FILE: &str = "food_log.json";
const SETTINGS_FILE: &str = "settings.yaml";
const CONFIG_FILE: &str = "config.yaml";

/// JsonConnection knows where every file of one installation lives
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    /// `MEAL_TRACKER_DATA_DIR` wins over the platform data directory.
    pub fn new_default() -> Result<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            let path = PathBuf::from(dir);
            info!("Using data directory from {}: {}", DATA_DIR_ENV, path.display());
            return Self::new(path);
        }

        let project_dirs = ProjectDirs::from("", "", "MealTracker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine a home directory for application data"))?;
        let path = project_dirs.data_dir().to_path_buf();
        info!("Using default data directory: {}", path.display());
        Self::new(path)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn entries_file_path(&self) -> PathBuf {
        self.base_directory.join(ENTRIES_FILE)
    }

    pub fn settings_file_path(&self) -> PathBuf {
        self.base_directory.join(SETTINGS_FILE)
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.base_directory.join(CONFIG_FILE)
    }
}

/// Write `contents` to `path` without ever exposing a truncated file there:
/// write a sibling temp file, sync it, then rename it over the target.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let result = write_and_sync(&temp_path, contents)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| StorageError::io(path, e)));

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!("Could not remove temp file {}: {}", temp_path.display(), e);
        }
    }

    if result.is_ok() {
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
    }
    result
}

fn write_and_sync(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let mut file = File::create(path).map_err(|e| StorageError::io(path, e))?;
    file.write_all(contents).map_err(|e| StorageError::io(path, e))?;
    file.sync_all().map_err(|e| StorageError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let connection = JsonConnection::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(connection.entries_file_path(), nested.join("food_log.json"));
        assert_eq!(connection.settings_file_path(), nested.join("settings.yaml"));
        assert_eq!(connection.config_file_path(), nested.join("config.yaml"));
    }

    #[test]
    fn test_write_atomically_replaces_contents_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("food_log.json");

        write_atomically(&path, b"[1, 2, 3]").unwrap();
        write_atomically(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_write_atomically_keeps_old_file_when_rename_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A directory at the target path makes the final rename fail
        let path = temp_dir.path().join("food_log.json");
        fs::create_dir(&path).unwrap();

        let result = write_atomically(&path, b"[]");

        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(path.is_dir());
        assert!(!path.with_extension("tmp").exists());
    }
}
