use serde::{Deserialize, Serialize};
use std::fmt;

/// A logged meal as presented to the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// UUID in hyphenated form
    pub id: String,
    pub name: String,
    pub calories: u32,
    /// Protein in grams
    pub protein: u32,
    pub meal_type: MealType,
    /// Human-readable timestamp with timezone (RFC 3339)
    pub date: String,
}

/// Meal category shown next to each entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn display_name(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Summed calories and protein for a set of entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u64,
    pub protein: u64,
}

/// The user's daily targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub calories: u32,
    pub protein: u32,
}

/// Progress towards each goal, clamped to 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub calories: f64,
    pub protein: f64,
}

/// Everything the "Today" screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayOverview {
    /// ISO 8601 date (YYYY-MM-DD)
    pub day: String,
    /// Most recent first
    pub entries: Vec<FoodEntry>,
    pub totals: NutritionTotals,
    pub goals: NutritionGoals,
    pub progress: GoalProgress,
}

/// Entries and totals for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDetail {
    /// ISO 8601 date (YYYY-MM-DD)
    pub day: String,
    pub entries: Vec<FoodEntry>,
    pub totals: NutritionTotals,
}

/// Pass/fail of one day against both goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// ISO 8601 date (YYYY-MM-DD)
    pub day: String,
    pub totals: NutritionTotals,
    pub met_goal: bool,
}

/// Seven day window ending at `ending`, oldest day first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub ending: String,
    pub goals: NutritionGoals,
    pub days: Vec<DaySummary>,
    pub days_met: usize,
}

/// History grouped by day, most recent day first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub days: Vec<DayDetail>,
}

/// Returned after an entry was added, edited or removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryChangeResponse {
    pub entry: FoodEntry,
    pub success_message: String,
}
