//! # JSON Entry Repository
//!
//! File-based storage of the whole food log in a single JSON array.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── config.yaml
//! ├── settings.yaml
//! └── food_log.json    ← This module manages this file
//! ```
//!
//! ## JSON Format
//!
//! ```json
//! [
//!   {
//!     "id": "9b2f6c7e-3f0a-4c55-8f59-5b7f1c1d2a10",
//!     "name": "Oatmeal",
//!     "calories": 350,
//!     "protein": 12,
//!     "mealType": "breakfast",
//!     "date": "2025-12-05T07:45:00-05:00"
//!   }
//! ]
//! ```
//!
//! ## Features
//!
//! - Full rewrite on every save, no appends
//! - Atomic file writes with temp files
//! - Configurable handling of undecodable files (see [`LoadPolicy`])

use chrono::{DateTime, SecondsFormat};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use uuid::Uuid;

use super::connection::{write_atomically, JsonConnection};
use crate::backend::domain::models::food_entry::{FoodEntry, MealType};
use crate::backend::storage::error::StorageError;
use crate::backend::storage::traits::{EntryStorage, LoadPolicy};

/// On-disk record for one entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodEntryRecord {
    id: String,
    name: String,
    calories: u32,
    protein: u32,
    meal_type: String,
    date: String,
}

impl From<&FoodEntry> for FoodEntryRecord {
    fn from(entry: &FoodEntry) -> Self {
        FoodEntryRecord {
            id: entry.id.hyphenated().to_string(),
            name: entry.name.clone(),
            calories: entry.calories,
            protein: entry.protein,
            meal_type: entry.meal_type.as_str().to_string(),
            // Keep sub-second precision so a reload yields the same instant
            date: entry.date.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        }
    }
}

impl TryFrom<FoodEntryRecord> for FoodEntry {
    type Error = String;

    fn try_from(record: FoodEntryRecord) -> Result<Self, String> {
        let id = Uuid::parse_str(&record.id)
            .map_err(|e| format!("Invalid id '{}': {}", record.id, e))?;
        let meal_type = MealType::from_string(&record.meal_type)?;
        let date = DateTime::parse_from_rfc3339(&record.date)
            .map_err(|e| format!("Invalid date '{}' for entry {}: {}", record.date, id, e))?;

        Ok(FoodEntry {
            id,
            name: record.name,
            calories: record.calories,
            protein: record.protein,
            meal_type,
            date,
        })
    }
}

/// JSON-file backed entry store
#[derive(Debug, Clone)]
pub struct JsonEntryRepository {
    connection: JsonConnection,
    load_policy: LoadPolicy,
}

impl JsonEntryRepository {
    pub fn new(connection: JsonConnection, load_policy: LoadPolicy) -> Self {
        Self {
            connection,
            load_policy,
        }
    }

    /// Apply the load policy to a file that exists but cannot be used
    fn unreadable(&self, err: StorageError) -> Result<Vec<FoodEntry>, StorageError> {
        match self.load_policy {
            LoadPolicy::FailOpen => {
                warn!("Treating food log as empty: {}", err);
                Ok(Vec::new())
            }
            LoadPolicy::FailClosed => {
                error!("Refusing to load food log: {}", err);
                Err(err)
            }
        }
    }
}

fn decode_entries(contents: &str) -> Result<Vec<FoodEntry>, String> {
    let records: Vec<FoodEntryRecord> = serde_json::from_str(contents).map_err(|e| e.to_string())?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let entry = FoodEntry::try_from(record)?;
        if !seen.insert(entry.id) {
            return Err(format!("Duplicate entry id {}", entry.id));
        }
        entries.push(entry);
    }
    Ok(entries)
}

impl EntryStorage for JsonEntryRepository {
    fn load_all(&self) -> Result<Vec<FoodEntry>, StorageError> {
        let path = self.connection.entries_file_path();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No food log at {}, starting empty", path.display());
                return Ok(Vec::new());
            }
            Err(e) => return self.unreadable(StorageError::io(path, e)),
        };

        match decode_entries(&contents) {
            Ok(entries) => {
                debug!("Loaded {} entries from {}", entries.len(), path.display());
                Ok(entries)
            }
            Err(reason) => self.unreadable(StorageError::Corrupt { path, reason }),
        }
    }

    fn save_all(&self, entries: &[FoodEntry]) -> Result<(), StorageError> {
        let path = self.connection.entries_file_path();
        let records: Vec<FoodEntryRecord> = entries.iter().map(FoodEntryRecord::from).collect();

        let json = serde_json::to_vec_pretty(&records).map_err(|e| StorageError::Encode {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if let Err(e) = write_atomically(&path, &json) {
            error!("Failed to save {} entries: {}", entries.len(), e);
            return Err(e);
        }

        info!("Saved {} entries to {}", entries.len(), path.display());
        Ok(())
    }
}
