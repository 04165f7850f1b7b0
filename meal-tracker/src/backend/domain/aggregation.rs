//! Aggregation over food entries.
//!
//! Every function here is pure: it takes a snapshot of entries (plus goals and
//! a time zone where needed) and derives totals, progress ratios, day filters
//! and day groupings. Nothing is cached or persisted. Day boundaries are those
//! of the supplied time zone, so callers pass `chrono::Local` for "what did I
//! eat today" semantics and a fixed offset in tests.

use chrono::{Days, NaiveDate, TimeZone};
use std::collections::BTreeMap;

use crate::backend::domain::models::food_entry::FoodEntry;
use crate::backend::domain::models::goals::NutritionGoals;
use crate::backend::domain::models::summary::{DayGroup, DaySummary, NutritionTotals};

/// Number of days covered by [`weekly_summary`]
pub const WEEK_LENGTH: u64 = 7;

/// Calendar day an entry was logged on, in `tz`
pub fn day_of<Tz: TimeZone>(entry: &FoodEntry, tz: &Tz) -> NaiveDate {
    entry.date.with_timezone(tz).date_naive()
}

/// Entries logged between midnight and midnight of `day` in `tz`
pub fn filter_by_day<Tz: TimeZone>(entries: &[FoodEntry], day: NaiveDate, tz: &Tz) -> Vec<FoodEntry> {
    entries
        .iter()
        .filter(|entry| day_of(entry, tz) == day)
        .cloned()
        .collect()
}

pub fn totals<'a, I>(entries: I) -> NutritionTotals
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries
        .into_iter()
        .fold(NutritionTotals::default(), |acc, entry| NutritionTotals {
            calories: acc.calories + u64::from(entry.calories),
            protein: acc.protein + u64::from(entry.protein),
        })
}

/// Fraction of `goal` reached, capped at 1.0. A zero goal yields 0.0.
pub fn progress(total: u64, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (total as f64 / f64::from(goal)).min(1.0)
}

/// Both goals must be reached, not just one
pub fn met_goals(totals: &NutritionTotals, goals: &NutritionGoals) -> bool {
    totals.calories >= u64::from(goals.calories) && totals.protein >= u64::from(goals.protein)
}

/// Pass/fail for the seven days ending at `reference_day` (inclusive), oldest first.
/// `None` when the window would start before the earliest representable date.
pub fn weekly_summary<Tz: TimeZone>(
    entries: &[FoodEntry],
    goals: &NutritionGoals,
    reference_day: NaiveDate,
    tz: &Tz,
) -> Option<Vec<DaySummary>> {
    let first_day = reference_day.checked_sub_days(Days::new(WEEK_LENGTH - 1))?;

    let mut totals_by_day: BTreeMap<NaiveDate, NutritionTotals> = BTreeMap::new();
    for entry in entries {
        let day = day_of(entry, tz);
        if day < first_day || day > reference_day {
            continue;
        }
        let day_totals = totals_by_day.entry(day).or_default();
        day_totals.calories += u64::from(entry.calories);
        day_totals.protein += u64::from(entry.protein);
    }

    (0..WEEK_LENGTH)
        .map(|offset| {
            let day = first_day.checked_add_days(Days::new(offset))?;
            let day_totals = totals_by_day.get(&day).copied().unwrap_or_default();
            Some(DaySummary {
                day,
                totals: day_totals,
                met_goal: met_goals(&day_totals, goals),
            })
        })
        .collect()
}

/// One group per distinct day, most recent day first. Entries inside a
/// group are in chronological order.
pub fn group_by_day<Tz: TimeZone>(entries: &[FoodEntry], tz: &Tz) -> Vec<DayGroup> {
    let mut by_day: BTreeMap<NaiveDate, Vec<FoodEntry>> = BTreeMap::new();
    for entry in entries {
        by_day.entry(day_of(entry, tz)).or_default().push(entry.clone());
    }

    by_day
        .into_iter()
        .rev()
        .map(|(day, mut day_entries)| {
            day_entries.sort_by_key(|entry| entry.date);
            let day_totals = totals(&day_entries);
            DayGroup {
                day,
                entries: day_entries,
                totals: day_totals,
            }
        })
        .collect()
}

/// Display order for entry lists
pub fn sort_newest_first(entries: &mut [FoodEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::food_entry::MealType;
    use chrono::{DateTime, FixedOffset};
    use uuid::Uuid;

    fn eastern() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_test_entry(date: &str, calories: u32, protein: u32, name: &str) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            calories,
            protein,
            meal_type: MealType::Lunch,
            date: DateTime::parse_from_rfc3339(date).unwrap(),
        }
    }

    #[test]
    fn test_totals_of_empty_collection() {
        let empty: Vec<FoodEntry> = Vec::new();
        assert_eq!(totals(&empty), NutritionTotals { calories: 0, protein: 0 });
    }

    #[test]
    fn test_totals_sum_both_fields() {
        let entries = vec![
            create_test_entry("2025-12-05T08:00:00-05:00", 300, 25, "Eggs"),
            create_test_entry("2025-12-05T12:00:00-05:00", 200, 10, "Salad"),
        ];
        assert_eq!(totals(&entries), NutritionTotals { calories: 500, protein: 35 });
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(progress(3000, 2300), 1.0);
        assert_eq!(progress(1150, 2300), 0.5);
        assert_eq!(progress(0, 150), 0.0);
    }

    #[test]
    fn test_progress_with_zero_goal() {
        assert_eq!(progress(100, 0), 0.0);
        assert_eq!(progress(0, 0), 0.0);
    }

    #[test]
    fn test_filter_by_day_uses_local_midnight() {
        let late = create_test_entry("2025-12-05T23:59:00-05:00", 400, 20, "Late snack");
        let next_day = create_test_entry("2025-12-06T00:01:00-05:00", 100, 5, "Midnight snack");
        let entries = vec![late.clone(), next_day.clone()];

        let filtered = filter_by_day(&entries, day("2025-12-05"), &eastern());
        assert_eq!(filtered, vec![late]);

        let filtered = filter_by_day(&entries, day("2025-12-06"), &eastern());
        assert_eq!(filtered, vec![next_day]);
    }

    #[test]
    fn test_filter_by_day_converts_other_offsets() {
        // 03:00 UTC on the 6th is still the evening of the 5th in -05:00
        let entry = create_test_entry("2025-12-06T03:00:00+00:00", 250, 8, "Toast");
        let filtered = filter_by_day(&[entry.clone()], day("2025-12-05"), &eastern());
        assert_eq!(filtered, vec![entry]);
    }

    #[test]
    fn test_weekly_summary_requires_both_goals() {
        let goals = NutritionGoals { calories: 2000, protein: 100 };
        let entries = vec![
            create_test_entry("2025-12-05T09:00:00-05:00", 1200, 50, "Breakfast"),
            create_test_entry("2025-12-05T19:00:00-05:00", 1000, 40, "Dinner"),
        ];

        let summary = weekly_summary(&entries, &goals, day("2025-12-05"), &eastern()).unwrap();
        let last = summary.last().unwrap();
        assert_eq!(last.day, day("2025-12-05"));
        assert_eq!(last.totals, NutritionTotals { calories: 2200, protein: 90 });
        assert!(!last.met_goal);
    }

    #[test]
    fn test_weekly_summary_covers_seven_days_oldest_first() {
        let goals = NutritionGoals { calories: 500, protein: 20 };
        let entries = vec![
            create_test_entry("2025-11-29T12:00:00-05:00", 600, 30, "Too early"),
            create_test_entry("2025-11-30T12:00:00-05:00", 600, 30, "First day"),
            create_test_entry("2025-12-03T12:00:00-05:00", 400, 30, "Short on calories"),
            create_test_entry("2025-12-06T12:00:00-05:00", 600, 30, "Last day"),
            create_test_entry("2025-12-07T12:00:00-05:00", 600, 30, "Too late"),
        ];

        let summary = weekly_summary(&entries, &goals, day("2025-12-06"), &eastern()).unwrap();

        let days: Vec<NaiveDate> = summary.iter().map(|s| s.day).collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], day("2025-11-30"));
        assert_eq!(days[6], day("2025-12-06"));

        let met: Vec<bool> = summary.iter().map(|s| s.met_goal).collect();
        assert_eq!(met, vec![true, false, false, false, false, false, true]);
        assert_eq!(summary[3].totals.calories, 400);
    }

    #[test]
    fn test_empty_day_only_passes_with_zero_goals() {
        let summary =
            weekly_summary(&[], &NutritionGoals { calories: 0, protein: 0 }, day("2025-12-05"), &eastern()).unwrap();
        assert!(summary.iter().all(|s| s.met_goal));

        let summary = weekly_summary(&[], &NutritionGoals::default(), day("2025-12-05"), &eastern()).unwrap();
        assert!(summary.iter().all(|s| !s.met_goal));
    }

    #[test]
    fn test_weekly_summary_at_the_edges_of_the_calendar() {
        let goals = NutritionGoals::default();

        // Parses fine, but six days earlier is not a representable date
        let earliest = NaiveDate::parse_from_str("-262143-01-02", "%Y-%m-%d").unwrap();
        assert_eq!(weekly_summary(&[], &goals, earliest, &eastern()), None);
        assert_eq!(weekly_summary(&[], &goals, NaiveDate::MIN, &eastern()), None);

        let summary = weekly_summary(&[], &goals, NaiveDate::MAX, &eastern()).unwrap();
        assert_eq!(summary.len(), 7);
        assert_eq!(summary[6].day, NaiveDate::MAX);
    }

    #[test]
    fn test_group_by_day_three_days_most_recent_first() {
        let entries = vec![
            create_test_entry("2025-12-04T08:00:00-05:00", 100, 1, "a"),
            create_test_entry("2025-12-06T20:00:00-05:00", 300, 3, "b"),
            create_test_entry("2025-12-05T13:00:00-05:00", 200, 2, "c"),
            create_test_entry("2025-12-06T07:00:00-05:00", 400, 4, "d"),
            create_test_entry("2025-12-04T23:30:00-05:00", 500, 5, "e"),
        ];

        let groups = group_by_day(&entries, &eastern());

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].day, day("2025-12-06"));
        assert_eq!(groups[1].day, day("2025-12-05"));
        assert_eq!(groups[2].day, day("2025-12-04"));

        for group in &groups {
            assert!(group.entries.iter().all(|e| day_of(e, &eastern()) == group.day));
        }

        let names: Vec<&str> = groups[0].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["d", "b"]);
        assert_eq!(groups[0].totals, NutritionTotals { calories: 700, protein: 7 });
        assert_eq!(groups[2].totals, NutritionTotals { calories: 600, protein: 6 });
    }

    #[test]
    fn test_group_by_day_empty() {
        assert!(group_by_day(&[], &eastern()).is_empty());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![
            create_test_entry("2025-12-05T08:00:00-05:00", 1, 1, "early"),
            create_test_entry("2025-12-05T18:00:00-05:00", 1, 1, "late"),
            create_test_entry("2025-12-05T12:00:00-05:00", 1, 1, "noon"),
        ];
        sort_newest_first(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["late", "noon", "early"]);
    }
}
