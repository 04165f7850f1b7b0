//! Plain-text rendering of the `shared` DTOs.
//!
//! Every function returns a `String` so output can be tested without
//! capturing stdout.

use chrono::{DateTime, NaiveDate};
use std::fmt::Write;

use shared::{
    DayDetail, EntryChangeResponse, FoodEntry, HistoryResponse, NutritionGoals, TodayOverview,
    WeeklySummary,
};

const PROGRESS_BAR_WIDTH: usize = 20;

/// "Friday, December 5, 2025"; unparseable input is shown as is
fn long_day(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => day.to_string(),
    }
}

/// "Fri Dec 5"
fn short_day(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%a %b %-d").to_string(),
        Err(_) => day.to_string(),
    }
}

/// Wall-clock time in the offset the timestamp carries; mappers put it in the display zone
fn time_of(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(date) => date.format("%-I:%M %p").to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn progress_bar(ratio: f64) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        ratio * 100.0
    )
}

pub fn entry_line(entry: &FoodEntry) -> String {
    format!(
        "{:>8}  {}  {} kcal • {} g • {}  ({})",
        time_of(&entry.date),
        entry.name,
        entry.calories,
        entry.protein,
        entry.meal_type,
        entry.id
    )
}

fn write_entries(out: &mut String, entries: &[FoodEntry]) {
    if entries.is_empty() {
        let _ = writeln!(out, "  Nothing logged.");
        return;
    }
    for entry in entries {
        let _ = writeln!(out, "  {}", entry_line(entry));
    }
}

pub fn render_change(response: &EntryChangeResponse) -> String {
    format!("{}\n  {}\n", response.success_message, entry_line(&response.entry))
}

pub fn render_today(overview: &TodayOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Today, {}", long_day(&overview.day));
    let _ = writeln!(
        out,
        "  Calories {} / {} kcal {}",
        overview.totals.calories,
        overview.goals.calories,
        progress_bar(overview.progress.calories)
    );
    let _ = writeln!(
        out,
        "  Protein  {} / {} g    {}",
        overview.totals.protein,
        overview.goals.protein,
        progress_bar(overview.progress.protein)
    );
    let _ = writeln!(out);
    write_entries(&mut out, &overview.entries);
    out
}

pub fn render_day(detail: &DayDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  ({} kcal • {} g)",
        long_day(&detail.day),
        detail.totals.calories,
        detail.totals.protein
    );
    write_entries(&mut out, &detail.entries);
    out
}

pub fn render_week(summary: &WeeklySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Week ending {}", long_day(&summary.ending));
    for day in &summary.days {
        let _ = writeln!(
            out,
            "  {:<10} {:>6} kcal {:>5} g  {}",
            short_day(&day.day),
            day.totals.calories,
            day.totals.protein,
            if day.met_goal { "✓" } else { "·" }
        );
    }
    let _ = writeln!(
        out,
        "Goals met on {} of {} days",
        summary.days_met,
        summary.days.len()
    );
    out
}

pub fn render_history(history: &HistoryResponse) -> String {
    if history.days.is_empty() {
        return "No entries yet.\n".to_string();
    }
    history
        .days
        .iter()
        .map(render_day)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_goals(goals: &NutritionGoals) -> String {
    format!("Calories: {} kcal\nProtein:  {} g\n", goals.calories, goals.protein)
}
