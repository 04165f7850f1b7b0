//! Pure transforms over the entry collection.
//!
//! A mutation never touches storage: it takes the current collection and
//! returns the next one. Persisting the result is the caller's job.

use uuid::Uuid;

use crate::backend::domain::models::food_entry::{FoodEntry, ValidatedFoodInput};

#[derive(Debug, Clone, PartialEq)]
pub enum EntryMutation {
    Add(FoodEntry),
    /// Replace every field except `id` and `date`
    Update { id: Uuid, changes: ValidatedFoodInput },
    Delete { id: Uuid },
}

/// The next collection plus the entry the mutation was about (as it looks
/// after the change, or as it was before a delete)
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub entries: Vec<FoodEntry>,
    pub affected: FoodEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("An entry with id {0} already exists")]
    DuplicateId(Uuid),
    #[error("No entry with id {0}")]
    NotFound(Uuid),
}

pub fn apply(entries: &[FoodEntry], mutation: EntryMutation) -> Result<MutationOutcome, MutationError> {
    match mutation {
        EntryMutation::Add(entry) => {
            if entries.iter().any(|existing| existing.id == entry.id) {
                return Err(MutationError::DuplicateId(entry.id));
            }
            let mut next = entries.to_vec();
            next.push(entry.clone());
            Ok(MutationOutcome {
                entries: next,
                affected: entry,
            })
        }
        EntryMutation::Update { id, changes } => {
            let position = find_position(entries, id)?;
            let mut next = entries.to_vec();
            next[position].apply_changes(changes);
            let affected = next[position].clone();
            Ok(MutationOutcome {
                entries: next,
                affected,
            })
        }
        EntryMutation::Delete { id } => {
            let position = find_position(entries, id)?;
            let mut next = entries.to_vec();
            let affected = next.remove(position);
            Ok(MutationOutcome {
                entries: next,
                affected,
            })
        }
    }
}

fn find_position(entries: &[FoodEntry], id: Uuid) -> Result<usize, MutationError> {
    entries
        .iter()
        .position(|entry| entry.id == id)
        .ok_or(MutationError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::food_entry::MealType;
    use chrono::DateTime;

    fn create_test_entry(name: &str, date: &str) -> FoodEntry {
        FoodEntry::new(
            ValidatedFoodInput::new(name, 250, 15, MealType::Snack).unwrap(),
            DateTime::parse_from_rfc3339(date).unwrap(),
        )
    }

    /// Three entries sharing the same name and timestamp
    fn duplicates() -> Vec<FoodEntry> {
        (0..3)
            .map(|_| create_test_entry("Protein bar", "2025-12-05T15:00:00-05:00"))
            .collect()
    }

    #[test]
    fn test_add_appends() {
        let entries = duplicates();
        let new_entry = create_test_entry("Apple", "2025-12-05T16:00:00-05:00");

        let outcome = apply(&entries, EntryMutation::Add(new_entry.clone())).unwrap();

        assert_eq!(outcome.entries.len(), 4);
        assert_eq!(outcome.entries.last(), Some(&new_entry));
        assert_eq!(outcome.affected, new_entry);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let entries = duplicates();
        let result = apply(&entries, EntryMutation::Add(entries[1].clone()));
        assert_eq!(result, Err(MutationError::DuplicateId(entries[1].id)));
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let entries = duplicates();
        let target = entries[1].id;

        let outcome = apply(&entries, EntryMutation::Delete { id: target }).unwrap();

        assert_eq!(outcome.entries.len(), entries.len() - 1);
        assert_eq!(outcome.affected.id, target);
        assert!(outcome.entries.iter().all(|e| e.id != target));
        assert_eq!(outcome.entries[0], entries[0]);
        assert_eq!(outcome.entries[1], entries[2]);
    }

    #[test]
    fn test_delete_unknown_id() {
        let entries = duplicates();
        let missing = Uuid::new_v4();
        let result = apply(&entries, EntryMutation::Delete { id: missing });
        assert_eq!(result, Err(MutationError::NotFound(missing)));
    }

    #[test]
    fn test_update_preserves_id_date_and_size() {
        let entries = duplicates();
        let target = entries[2].clone();
        let changes = ValidatedFoodInput::new("Greek yogurt", 180, 17, MealType::Breakfast).unwrap();

        let outcome = apply(&entries, EntryMutation::Update { id: target.id, changes }).unwrap();

        assert_eq!(outcome.entries.len(), entries.len());
        let updated = &outcome.entries[2];
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.date, target.date);
        assert_eq!(updated.name, "Greek yogurt");
        assert_eq!(updated.calories, 180);
        assert_eq!(updated.protein, 17);
        assert_eq!(updated.meal_type, MealType::Breakfast);
        assert_eq!(&outcome.affected, updated);
        assert_eq!(outcome.entries[0], entries[0]);
        assert_eq!(outcome.entries[1], entries[1]);
    }

    #[test]
    fn test_update_unknown_id() {
        let entries = duplicates();
        let missing = Uuid::new_v4();
        let changes = ValidatedFoodInput::new("Nothing", 0, 0, MealType::Snack).unwrap();
        let result = apply(&entries, EntryMutation::Update { id: missing, changes });
        assert_eq!(result, Err(MutationError::NotFound(missing)));
    }

    #[test]
    fn test_input_collection_is_untouched() {
        let entries = duplicates();
        let before = entries.clone();
        let _ = apply(&entries, EntryMutation::Delete { id: entries[0].id }).unwrap();
        assert_eq!(entries, before);
    }
}
