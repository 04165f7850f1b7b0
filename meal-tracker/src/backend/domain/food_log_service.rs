//! Food log service: the session's working set of entries.
//!
//! The service keeps the in-memory collection, applies each change as a
//! pure [`entry_mutations::apply`] transform and then persists the whole
//! new collection. The working set is updated before the save, so if the
//! save fails the user keeps their current view and gets the error.

use chrono::Local;
use log::{error, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::domain::commands::entries::{
    CreateFoodEntryCommand, DeleteFoodEntryCommand, FoodEntryResult, UpdateFoodEntryCommand,
};
use crate::backend::domain::entry_mutations::{self, EntryMutation, MutationError, MutationOutcome};
use crate::backend::domain::models::food_entry::FoodEntry;
use crate::backend::storage::{EntryStorage, PersistMode, Persister, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum FoodLogError {
    #[error(transparent)]
    Mutation(#[from] MutationError),
    #[error("Could not load the food log")]
    Load(#[source] StorageError),
    #[error("The change is kept for this session but could not be saved")]
    Storage(#[source] StorageError),
}

pub struct FoodLogService {
    storage: Arc<dyn EntryStorage>,
    persister: Persister,
    entries: Vec<FoodEntry>,
}

impl FoodLogService {
    /// Create a service with an empty working set. Call [`Self::load`] to
    /// read what is on disk.
    pub fn new(storage: Arc<dyn EntryStorage>, mode: PersistMode) -> Self {
        let persister = Persister::new(storage.clone(), mode);
        Self {
            storage,
            persister,
            entries: Vec::new(),
        }
    }

    /// Replace the working set with the stored collection
    pub fn load(&mut self) -> Result<usize, FoodLogError> {
        self.entries = self.storage.load_all().map_err(FoodLogError::Load)?;
        info!("Loaded {} food entries", self.entries.len());
        Ok(self.entries.len())
    }

    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    pub fn get_entry(&self, id: Uuid) -> Option<&FoodEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn add_entry(&mut self, command: CreateFoodEntryCommand) -> Result<FoodEntryResult, FoodLogError> {
        let date = command.date.unwrap_or_else(|| Local::now().fixed_offset());
        let entry = FoodEntry::new(command.input, date);
        info!("Adding entry {} ({})", entry.id, entry.name);

        let outcome = entry_mutations::apply(&self.entries, EntryMutation::Add(entry))?;
        let entry = self.commit(outcome)?;

        Ok(FoodEntryResult {
            success_message: format!("Logged {}", entry.name),
            entry,
        })
    }

    pub fn update_entry(&mut self, command: UpdateFoodEntryCommand) -> Result<FoodEntryResult, FoodLogError> {
        info!("Updating entry {}", command.id);

        let mutation = EntryMutation::Update {
            id: command.id,
            changes: command.input,
        };
        let outcome = entry_mutations::apply(&self.entries, mutation)?;
        let entry = self.commit(outcome)?;

        Ok(FoodEntryResult {
            success_message: format!("Updated {}", entry.name),
            entry,
        })
    }

    pub fn delete_entry(&mut self, command: DeleteFoodEntryCommand) -> Result<FoodEntryResult, FoodLogError> {
        info!("Deleting entry {}", command.id);

        let outcome = entry_mutations::apply(&self.entries, EntryMutation::Delete { id: command.id })?;
        let entry = self.commit(outcome)?;

        Ok(FoodEntryResult {
            success_message: format!("Deleted {}", entry.name),
            entry,
        })
    }

    /// Wait for queued background saves
    pub fn flush(&self) -> Result<(), FoodLogError> {
        self.persister.flush().map_err(FoodLogError::Storage)
    }

    fn commit(&mut self, outcome: MutationOutcome) -> Result<FoodEntry, FoodLogError> {
        self.entries = outcome.entries;
        if let Err(e) = self.persister.persist(&self.entries) {
            error!("Food log save failed, keeping {} entries in memory: {}", self.entries.len(), e);
            return Err(FoodLogError::Storage(e));
        }
        Ok(outcome.affected)
    }
}
