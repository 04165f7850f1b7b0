//! Domain model for a logged meal.
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

/// Longest accepted entry name, in characters
pub const MAX_NAME_LENGTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    /// Token used in the entry file
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Parse a stored or typed token, ignoring case and surrounding whitespace
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(format!("Invalid meal type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodEntry {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub meal_type: MealType,
    pub date: DateTime<FixedOffset>,
}

impl FoodEntry {
    /// Build a brand new entry with a fresh id
    pub fn new(input: ValidatedFoodInput, date: DateTime<FixedOffset>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            calories: input.calories,
            protein: input.protein,
            meal_type: input.meal_type,
            date,
        }
    }

    /// Replace every user-editable field. `id` and `date` are kept.
    pub fn apply_changes(&mut self, changes: ValidatedFoodInput) {
        self.name = changes.name;
        self.calories = changes.calories;
        self.protein = changes.protein;
        self.meal_type = changes.meal_type;
    }
}

/// Fields of an entry that passed validation. Can only be built through
/// [`ValidatedFoodInput::new`] or [`FoodEntryDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFoodInput {
    name: String,
    calories: u32,
    protein: u32,
    meal_type: MealType,
}

impl ValidatedFoodInput {
    pub fn new(
        name: &str,
        calories: u32,
        protein: u32,
        meal_type: MealType,
    ) -> Result<Self, FoodEntryValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            calories,
            protein,
            meal_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calories(&self) -> u32 {
        self.calories
    }

    pub fn protein(&self) -> u32 {
        self.protein
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }
}

/// Raw form input, exactly as typed by the user
#[derive(Debug, Clone, Default)]
pub struct FoodEntryDraft {
    pub name: String,
    pub calories: String,
    pub protein: String,
    pub meal_type: String,
}

impl FoodEntryDraft {
    pub fn validate(&self) -> Result<ValidatedFoodInput, FoodEntryValidationError> {
        let name = validate_name(&self.name)?;
        let calories = parse_amount(&self.calories)
            .ok_or_else(|| FoodEntryValidationError::InvalidCalories(self.calories.clone()))?;
        let protein = parse_amount(&self.protein)
            .ok_or_else(|| FoodEntryValidationError::InvalidProtein(self.protein.clone()))?;
        let meal_type = MealType::from_string(&self.meal_type)
            .map_err(|_| FoodEntryValidationError::UnknownMealType(self.meal_type.clone()))?;

        Ok(ValidatedFoodInput {
            name,
            calories,
            protein,
            meal_type,
        })
    }
}

fn validate_name(name: &str) -> Result<String, FoodEntryValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FoodEntryValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(FoodEntryValidationError::NameTooLong);
    }
    Ok(trimmed.to_string())
}

/// Whole, non-negative numbers only
fn parse_amount(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FoodEntryValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name cannot exceed {} characters", MAX_NAME_LENGTH)]
    NameTooLong,
    #[error("Calories must be a whole number of zero or more (got '{0}')")]
    InvalidCalories(String),
    #[error("Protein must be a whole number of grams, zero or more (got '{0}')")]
    InvalidProtein(String),
    #[error("Unknown meal type '{0}' (expected breakfast, lunch, dinner or snack)")]
    UnknownMealType(String),
}
