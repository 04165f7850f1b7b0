use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::commands::goals::{UpdateGoalsCommand, UpdateGoalsResult};
use crate::backend::domain::models::goals::{
    GoalLimits, NutritionGoals, CALORIE_GOAL_LIMITS, DEFAULT_CALORIE_GOAL, DEFAULT_PROTEIN_GOAL,
    PROTEIN_GOAL_LIMITS,
};
use crate::backend::storage::traits::SettingsStorage;

pub const CALORIE_GOAL_KEY: &str = "calorie_goal";
pub const PROTEIN_GOAL_KEY: &str = "protein_goal";

/// Service for reading and changing the daily nutrition goals
#[derive(Clone)]
pub struct GoalService {
    settings: Arc<dyn SettingsStorage>,
}

impl GoalService {
    pub fn new(settings: Arc<dyn SettingsStorage>) -> Self {
        Self { settings }
    }

    /// Current goals. Unset keys take their defaults; stored values outside
    /// the allowed range are clamped.
    pub fn get_goals(&self) -> Result<NutritionGoals> {
        let calories = self.read_goal(CALORIE_GOAL_KEY, &CALORIE_GOAL_LIMITS, DEFAULT_CALORIE_GOAL)?;
        let protein = self.read_goal(PROTEIN_GOAL_KEY, &PROTEIN_GOAL_LIMITS, DEFAULT_PROTEIN_GOAL)?;
        Ok(NutritionGoals { calories, protein })
    }

    pub fn update_goals(&self, command: UpdateGoalsCommand) -> Result<UpdateGoalsResult> {
        info!("Updating goals: {:?}", command);

        // Validate everything before writing anything
        let calories = command
            .calories
            .map(|value| CALORIE_GOAL_LIMITS.validate(value))
            .transpose()?;
        let protein = command
            .protein
            .map(|value| PROTEIN_GOAL_LIMITS.validate(value))
            .transpose()?;

        if let Some(calories) = calories {
            self.settings
                .set_int(CALORIE_GOAL_KEY, i64::from(calories))
                .context("Failed to save calorie goal")?;
        }
        if let Some(protein) = protein {
            self.settings
                .set_int(PROTEIN_GOAL_KEY, i64::from(protein))
                .context("Failed to save protein goal")?;
        }

        let goals = self.get_goals()?;
        let success_message = match (calories, protein) {
            (None, None) => "Goals unchanged".to_string(),
            _ => format!("Goals set to {} kcal and {} g protein", goals.calories, goals.protein),
        };

        Ok(UpdateGoalsResult { goals, success_message })
    }

    fn read_goal(&self, key: &str, limits: &GoalLimits, default: u32) -> Result<u32> {
        let stored = self
            .settings
            .get_int(key)
            .with_context(|| format!("Failed to read setting {}", key))?;

        Ok(match stored {
            None => default,
            Some(value) => {
                let clamped = limits.clamp(value);
                if i64::from(clamped) != value {
                    warn!("Stored {} of {} is out of range, using {}", key, value, clamped);
                }
                clamped
            }
        })
    }
}
