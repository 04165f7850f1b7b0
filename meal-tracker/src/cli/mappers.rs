//! Domain model to `shared` DTO conversions for JSON output.

use chrono::{NaiveDate, Offset, SecondsFormat, TimeZone};

use crate::backend::domain::commands::entries::FoodEntryResult;
use crate::backend::domain::models::food_entry::{FoodEntry, MealType};
use crate::backend::domain::models::goals::NutritionGoals;
use crate::backend::domain::models::summary::{
    DayGroup, DaySummary, NutritionTotals, TodayOverview, WeeklyReport,
};

/// Calendar days travel as `YYYY-MM-DD`
fn day_to_dto(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

pub struct FoodEntryMapper;

impl FoodEntryMapper {
    pub fn meal_type_to_dto(meal_type: MealType) -> shared::MealType {
        match meal_type {
            MealType::Breakfast => shared::MealType::Breakfast,
            MealType::Lunch => shared::MealType::Lunch,
            MealType::Dinner => shared::MealType::Dinner,
            MealType::Snack => shared::MealType::Snack,
        }
    }

    /// The timestamp is re-expressed in `tz`, the zone days are grouped in,
    /// so the shown time and the day it is filed under agree
    pub fn to_dto<Tz: TimeZone>(entry: &FoodEntry, tz: &Tz) -> shared::FoodEntry {
        let offset = entry.date.with_timezone(tz).offset().fix();
        shared::FoodEntry {
            id: entry.id.to_string(),
            name: entry.name.clone(),
            calories: entry.calories,
            protein: entry.protein,
            meal_type: Self::meal_type_to_dto(entry.meal_type),
            date: entry
                .date
                .with_timezone(&offset)
                .to_rfc3339_opts(SecondsFormat::AutoSi, false),
        }
    }

    pub fn to_dto_list<Tz: TimeZone>(entries: &[FoodEntry], tz: &Tz) -> Vec<shared::FoodEntry> {
        entries.iter().map(|entry| Self::to_dto(entry, tz)).collect()
    }

    pub fn to_change_response<Tz: TimeZone>(result: &FoodEntryResult, tz: &Tz) -> shared::EntryChangeResponse {
        shared::EntryChangeResponse {
            entry: Self::to_dto(&result.entry, tz),
            success_message: result.success_message.clone(),
        }
    }
}

pub struct SummaryMapper;

impl SummaryMapper {
    pub fn totals_to_dto(totals: NutritionTotals) -> shared::NutritionTotals {
        shared::NutritionTotals {
            calories: totals.calories,
            protein: totals.protein,
        }
    }

    pub fn goals_to_dto(goals: NutritionGoals) -> shared::NutritionGoals {
        shared::NutritionGoals {
            calories: goals.calories,
            protein: goals.protein,
        }
    }

    pub fn to_today_dto<Tz: TimeZone>(overview: &TodayOverview, tz: &Tz) -> shared::TodayOverview {
        shared::TodayOverview {
            day: day_to_dto(overview.day),
            entries: FoodEntryMapper::to_dto_list(&overview.entries, tz),
            totals: Self::totals_to_dto(overview.totals),
            goals: Self::goals_to_dto(overview.goals),
            progress: shared::GoalProgress {
                calories: overview.calorie_progress,
                protein: overview.protein_progress,
            },
        }
    }

    pub fn to_day_detail_dto<Tz: TimeZone>(group: &DayGroup, tz: &Tz) -> shared::DayDetail {
        shared::DayDetail {
            day: day_to_dto(group.day),
            entries: FoodEntryMapper::to_dto_list(&group.entries, tz),
            totals: Self::totals_to_dto(group.totals),
        }
    }

    fn day_summary_to_dto(summary: &DaySummary) -> shared::DaySummary {
        shared::DaySummary {
            day: day_to_dto(summary.day),
            totals: Self::totals_to_dto(summary.totals),
            met_goal: summary.met_goal,
        }
    }

    pub fn to_weekly_dto(report: &WeeklyReport) -> shared::WeeklySummary {
        shared::WeeklySummary {
            ending: day_to_dto(report.ending),
            goals: Self::goals_to_dto(report.goals),
            days: report.days.iter().map(Self::day_summary_to_dto).collect(),
            days_met: report.days_met,
        }
    }

    pub fn to_history_dto<Tz: TimeZone>(groups: &[DayGroup], tz: &Tz) -> shared::HistoryResponse {
        shared::HistoryResponse {
            days: groups.iter().map(|group| Self::to_day_detail_dto(group, tz)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::summary_service::SummaryService;
    use crate::backend::storage::json::test_utils::entry_at;
    use chrono::FixedOffset;

    fn eastern() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    #[test]
    fn test_entry_to_dto_keeps_offset_and_fraction() {
        let entry = entry_at("Salmon & rice", 710, 45, MealType::Dinner, "2025-12-06T19:10:42.123-05:00");

        let dto = FoodEntryMapper::to_dto(&entry, &eastern());

        assert_eq!(dto.id, entry.id.to_string());
        assert_eq!(dto.meal_type, shared::MealType::Dinner);
        assert_eq!(dto.date, "2025-12-06T19:10:42.123-05:00");
    }

    #[test]
    fn test_entry_time_follows_the_grouping_zone() {
        // Logged while travelling: 03:00 UTC is still the evening before in New York
        let entry = entry_at("Late pasta", 800, 30, MealType::Dinner, "2025-12-06T03:00:00+00:00");
        let history = SummaryService::new().history(std::slice::from_ref(&entry), &eastern());

        let dto = SummaryMapper::to_history_dto(&history, &eastern());

        assert_eq!(dto.days[0].day, "2025-12-05");
        assert_eq!(dto.days[0].entries[0].date, "2025-12-05T22:00:00-05:00");
        assert!(crate::cli::render::entry_line(&dto.days[0].entries[0]).contains("10:00 PM"));
    }

    #[test]
    fn test_weekly_dto_formats_days() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
        let report = WeeklyReport {
            ending: day,
            goals: NutritionGoals::default(),
            days: vec![DaySummary {
                day,
                totals: NutritionTotals {
                    calories: 2400,
                    protein: 160,
                },
                met_goal: true,
            }],
            days_met: 1,
        };

        let dto = SummaryMapper::to_weekly_dto(&report);

        assert_eq!(dto.ending, "2025-12-07");
        assert_eq!(dto.days[0].day, "2025-12-07");
        assert_eq!(dto.days[0].totals.calories, 2400);
        assert_eq!(dto.goals.calories, 2300);
    }
}
