//! Read-only views over the food log. Derived on demand from the current
//! working set and goals, never cached.

use chrono::{NaiveDate, TimeZone};
use log::debug;

use crate::backend::domain::aggregation;
use crate::backend::domain::models::food_entry::FoodEntry;
use crate::backend::domain::models::goals::NutritionGoals;
use crate::backend::domain::models::summary::{DayGroup, TodayOverview, WeeklyReport};

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// What was eaten on `today`, newest first, against the goals
    pub fn today_overview<Tz: TimeZone>(
        &self,
        entries: &[FoodEntry],
        goals: NutritionGoals,
        today: NaiveDate,
        tz: &Tz,
    ) -> TodayOverview {
        let mut day_entries = aggregation::filter_by_day(entries, today, tz);
        aggregation::sort_newest_first(&mut day_entries);
        let totals = aggregation::totals(&day_entries);

        TodayOverview {
            day: today,
            calorie_progress: aggregation::progress(totals.calories, goals.calories),
            protein_progress: aggregation::progress(totals.protein, goals.protein),
            entries: day_entries,
            totals,
            goals,
        }
    }

    /// Entries of one day in the order they were eaten
    pub fn day_detail<Tz: TimeZone>(&self, entries: &[FoodEntry], day: NaiveDate, tz: &Tz) -> DayGroup {
        let mut day_entries = aggregation::filter_by_day(entries, day, tz);
        day_entries.sort_by_key(|entry| entry.date);
        let totals = aggregation::totals(&day_entries);

        DayGroup {
            day,
            entries: day_entries,
            totals,
        }
    }

    pub fn weekly<Tz: TimeZone>(
        &self,
        entries: &[FoodEntry],
        goals: NutritionGoals,
        reference_day: NaiveDate,
        tz: &Tz,
    ) -> Option<WeeklyReport> {
        let days = aggregation::weekly_summary(entries, &goals, reference_day, tz)?;
        let days_met = days.iter().filter(|day| day.met_goal).count();
        debug!("Week ending {}: goals met on {} of {} days", reference_day, days_met, days.len());

        Some(WeeklyReport {
            ending: reference_day,
            goals,
            days,
            days_met,
        })
    }

    /// Every logged day, most recent first
    pub fn history<Tz: TimeZone>(&self, entries: &[FoodEntry], tz: &Tz) -> Vec<DayGroup> {
        aggregation::group_by_day(entries, tz)
    }
}
