//! Test utilities: a throwaway data directory plus entry builders.
//!
//! The temporary directory is removed when the environment is dropped,
//! even if a test panics.

use chrono::DateTime;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::entry_repository::JsonEntryRepository;
use crate::backend::domain::models::food_entry::{FoodEntry, MealType, ValidatedFoodInput};
use crate::backend::storage::traits::LoadPolicy;

pub struct TestEnvironment {
    pub connection: JsonConnection,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        Self {
            connection,
            _temp_dir: temp_dir,
        }
    }

    pub fn entry_repository(&self, load_policy: LoadPolicy) -> JsonEntryRepository {
        JsonEntryRepository::new(self.connection.clone(), load_policy)
    }

    /// Write raw bytes to the entry file, bypassing the repository
    pub fn write_entries_file(&self, contents: &str) {
        std::fs::write(self.connection.entries_file_path(), contents)
            .expect("Failed to write entries file");
    }
}

/// Build an entry at an RFC 3339 timestamp
pub fn entry_at(name: &str, calories: u32, protein: u32, meal_type: MealType, date: &str) -> FoodEntry {
    FoodEntry::new(
        ValidatedFoodInput::new(name, calories, protein, meal_type).expect("invalid test input"),
        DateTime::parse_from_rfc3339(date).expect("invalid test date"),
    )
}

/// A small collection with mixed meal types, offsets and sub-second timestamps
pub fn sample_entries() -> Vec<FoodEntry> {
    vec![
        entry_at("Oatmeal", 350, 12, MealType::Breakfast, "2025-12-05T07:45:00-05:00"),
        entry_at("Chicken salad", 520, 41, MealType::Lunch, "2025-12-05T12:30:15.250-05:00"),
        entry_at("Protein shake", 160, 30, MealType::Snack, "2025-12-05T21:05:00+00:00"),
        entry_at("Salmon & rice", 710, 45, MealType::Dinner, "2025-12-06T19:10:42.123456789-05:00"),
    ]
}
