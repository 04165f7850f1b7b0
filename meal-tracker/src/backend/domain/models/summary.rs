//! Derived views over the entry collection. Never persisted.
use chrono::NaiveDate;

use super::food_entry::FoodEntry;
use super::goals::NutritionGoals;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NutritionTotals {
    pub calories: u64,
    pub protein: u64,
}

/// One day of the weekly window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub totals: NutritionTotals,
    pub met_goal: bool,
}

/// Entries logged on one calendar day, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub entries: Vec<FoodEntry>,
    pub totals: NutritionTotals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayOverview {
    pub day: NaiveDate,
    /// Most recent first
    pub entries: Vec<FoodEntry>,
    pub totals: NutritionTotals,
    pub goals: NutritionGoals,
    pub calorie_progress: f64,
    pub protein_progress: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub ending: NaiveDate,
    pub goals: NutritionGoals,
    pub days: Vec<DaySummary>,
    pub days_met: usize,
}
