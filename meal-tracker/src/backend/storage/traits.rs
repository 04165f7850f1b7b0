//! # Storage Traits
//!
//! Storage abstractions the domain layer works against. The JSON/YAML
//! implementations live in [`super::json`]; tests and future backends can
//! provide their own.

use serde::{Deserialize, Serialize};

use super::error::StorageError;
use crate::backend::domain::models::food_entry::FoodEntry;

/// What `load_all` does when the backing file exists but cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Log the problem and behave as if there were no entries
    #[default]
    FailOpen,
    /// Return the error to the caller
    FailClosed,
}

/// Durable home of the full entry collection
pub trait EntryStorage: Send + Sync {
    /// Read every entry. A missing file is an empty collection, never an error.
    fn load_all(&self) -> Result<Vec<FoodEntry>, StorageError>;

    /// Replace the stored collection with `entries`. Must never leave a
    /// partially written file at the canonical location.
    fn save_all(&self, entries: &[FoodEntry]) -> Result<(), StorageError>;
}

/// String-keyed integer preferences
pub trait SettingsStorage: Send + Sync {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StorageError>;

    fn set_int(&self, key: &str, value: i64) -> Result<(), StorageError>;
}
