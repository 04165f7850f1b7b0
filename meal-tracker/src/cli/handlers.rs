//! Command handlers: turn parsed arguments into service calls and produce
//! the text or JSON to print.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use log::debug;
use serde::Serialize;
use uuid::Uuid;

use super::args::{Cli, Commands, GoalsAction};
use super::mappers::{FoodEntryMapper, SummaryMapper};
use super::render;
use crate::backend::domain::commands::entries::{
    CreateFoodEntryCommand, DeleteFoodEntryCommand, UpdateFoodEntryCommand,
};
use crate::backend::domain::commands::goals::UpdateGoalsCommand;
use crate::backend::domain::models::food_entry::FoodEntryDraft;
use crate::backend::storage::LoadPolicy;
use crate::backend::{Backend, JsonConnection};

/// Open the backend named by the global flags, run one command, print its
/// output
pub fn run(cli: Cli) -> Result<()> {
    let load_policy = cli.fail_closed.then_some(LoadPolicy::FailClosed);
    let mut backend = match &cli.data_dir {
        Some(dir) => Backend::new(JsonConnection::new(dir)?, load_policy)?,
        None => Backend::open_default(load_policy)?,
    };

    let output = execute(&mut backend, cli.command, cli.json)?;
    backend
        .food_log_service
        .flush()
        .context("Failed to finish saving the food log")?;

    print!("{}", output);
    Ok(())
}

pub fn execute(backend: &mut Backend, command: Commands, json: bool) -> Result<String> {
    debug!("Executing {:?}", command);
    match command {
        Commands::Add {
            name,
            calories,
            protein,
            meal,
            at,
        } => handle_add(backend, FoodEntryDraft { name, calories, protein, meal_type: meal }, at, json),
        Commands::Edit {
            id,
            name,
            calories,
            protein,
            meal,
        } => handle_edit(backend, &id, name, calories, protein, meal, json),
        Commands::Delete { id } => handle_delete(backend, &id, json),
        Commands::Today => handle_today(backend, json),
        Commands::Day { date } => handle_day(backend, &date, json),
        Commands::Week { ending } => handle_week(backend, ending.as_deref(), json),
        Commands::History => handle_history(backend, json),
        Commands::Goals { action } => handle_goals(backend, action, json),
    }
}

fn output<T: Serialize>(dto: &T, json: bool, render: impl FnOnce(&T) -> String) -> Result<String> {
    if json {
        let mut text = serde_json::to_string_pretty(dto).context("Failed to encode output")?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(render(dto))
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).with_context(|| format!("'{}' is not a valid entry ID", raw))
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("'{}' is not a date in YYYY-MM-DD form", raw))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_add(backend: &mut Backend, draft: FoodEntryDraft, at: Option<String>, json: bool) -> Result<String> {
    let input = draft.validate()?;
    let date = at
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .with_context(|| format!("'{}' is not an RFC 3339 timestamp", raw))
        })
        .transpose()?;

    let result = backend
        .food_log_service
        .add_entry(CreateFoodEntryCommand { input, date })?;

    output(&FoodEntryMapper::to_change_response(&result, &Local), json, render::render_change)
}

fn handle_edit(
    backend: &mut Backend,
    raw_id: &str,
    name: Option<String>,
    calories: Option<String>,
    protein: Option<String>,
    meal: Option<String>,
    json: bool,
) -> Result<String> {
    let id = parse_id(raw_id)?;
    let existing = backend
        .food_log_service
        .get_entry(id)
        .ok_or_else(|| anyhow!("No entry with id {}", id))?;

    // The edit form starts prefilled with the current values
    let draft = FoodEntryDraft {
        name: name.unwrap_or_else(|| existing.name.clone()),
        calories: calories.unwrap_or_else(|| existing.calories.to_string()),
        protein: protein.unwrap_or_else(|| existing.protein.to_string()),
        meal_type: meal.unwrap_or_else(|| existing.meal_type.as_str().to_string()),
    };
    let input = draft.validate()?;

    let result = backend
        .food_log_service
        .update_entry(UpdateFoodEntryCommand { id, input })?;

    output(&FoodEntryMapper::to_change_response(&result, &Local), json, render::render_change)
}

fn handle_delete(backend: &mut Backend, raw_id: &str, json: bool) -> Result<String> {
    let id = parse_id(raw_id)?;
    let result = backend
        .food_log_service
        .delete_entry(DeleteFoodEntryCommand { id })?;

    output(&FoodEntryMapper::to_change_response(&result, &Local), json, render::render_change)
}

fn handle_today(backend: &Backend, json: bool) -> Result<String> {
    let goals = backend.goal_service.get_goals()?;
    let overview = backend.summary_service.today_overview(
        backend.food_log_service.entries(),
        goals,
        today(),
        &Local,
    );

    output(&SummaryMapper::to_today_dto(&overview, &Local), json, render::render_today)
}

fn handle_day(backend: &Backend, raw_day: &str, json: bool) -> Result<String> {
    let day = parse_day(raw_day)?;
    let detail = backend
        .summary_service
        .day_detail(backend.food_log_service.entries(), day, &Local);

    output(&SummaryMapper::to_day_detail_dto(&detail, &Local), json, render::render_day)
}

fn handle_week(backend: &Backend, ending: Option<&str>, json: bool) -> Result<String> {
    let ending = match ending {
        Some(raw) => parse_day(raw)?,
        None => today(),
    };
    let goals = backend.goal_service.get_goals()?;
    let report = backend
        .summary_service
        .weekly(backend.food_log_service.entries(), goals, ending, &Local)
        .ok_or_else(|| anyhow!("No full week ends on {}", ending))?;

    output(&SummaryMapper::to_weekly_dto(&report), json, render::render_week)
}

fn handle_history(backend: &Backend, json: bool) -> Result<String> {
    let groups = backend
        .summary_service
        .history(backend.food_log_service.entries(), &Local);

    output(&SummaryMapper::to_history_dto(&groups, &Local), json, render::render_history)
}

fn handle_goals(backend: &Backend, action: GoalsAction, json: bool) -> Result<String> {
    match action {
        GoalsAction::Show => {
            let goals = backend.goal_service.get_goals()?;
            output(&SummaryMapper::goals_to_dto(goals), json, render::render_goals)
        }
        GoalsAction::Set { calories, protein } => {
            let result = backend
                .goal_service
                .update_goals(UpdateGoalsCommand { calories, protein })?;
            let dto = SummaryMapper::goals_to_dto(result.goals);
            output(&dto, json, |goals| {
                format!("{}\n{}", result.success_message, render::render_goals(goals))
            })
        }
    }
}
