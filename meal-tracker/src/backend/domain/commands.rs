//! Domain-level command and result types.
//!
//! Front ends map their raw input onto these structs before calling a
//! service. Input that reaches a command has already been validated.

pub mod entries {
    use chrono::{DateTime, FixedOffset};
    use uuid::Uuid;

    use crate::backend::domain::models::food_entry::{FoodEntry, ValidatedFoodInput};

    /// Input for logging a new meal.
    #[derive(Debug, Clone)]
    pub struct CreateFoodEntryCommand {
        pub input: ValidatedFoodInput,
        /// Log time; the current local time when `None`
        pub date: Option<DateTime<FixedOffset>>,
    }

    /// Replace the editable fields of an existing entry.
    #[derive(Debug, Clone)]
    pub struct UpdateFoodEntryCommand {
        pub id: Uuid,
        pub input: ValidatedFoodInput,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteFoodEntryCommand {
        pub id: Uuid,
    }

    /// Result of any entry change.
    #[derive(Debug, Clone)]
    pub struct FoodEntryResult {
        pub entry: FoodEntry,
        pub success_message: String,
    }
}

pub mod goals {
    use crate::backend::domain::models::goals::NutritionGoals;

    /// Fields left as `None` keep their current value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateGoalsCommand {
        pub calories: Option<i64>,
        pub protein: Option<i64>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateGoalsResult {
        pub goals: NutritionGoals,
        pub success_message: String,
    }
}
