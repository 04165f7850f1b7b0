/// Daily calorie and protein targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutritionGoals {
    pub calories: u32,
    pub protein: u32,
}

pub const DEFAULT_CALORIE_GOAL: u32 = 2300;
pub const DEFAULT_PROTEIN_GOAL: u32 = 150;

impl Default for NutritionGoals {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIE_GOAL,
            protein: DEFAULT_PROTEIN_GOAL,
        }
    }
}

/// Valid range and step granularity of one goal setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalLimits {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

pub const CALORIE_GOAL_LIMITS: GoalLimits = GoalLimits {
    label: "Calorie goal",
    min: 0,
    max: 10_000,
    step: 50,
};

pub const PROTEIN_GOAL_LIMITS: GoalLimits = GoalLimits {
    label: "Protein goal",
    min: 0,
    max: 400,
    step: 5,
};

impl GoalLimits {
    /// Accept a value only when it is in range and lands on a step
    pub fn validate(&self, value: i64) -> Result<u32, GoalValidationError> {
        if value < i64::from(self.min) || value > i64::from(self.max) {
            return Err(GoalValidationError::OutOfRange {
                label: self.label,
                value,
                min: self.min,
                max: self.max,
            });
        }
        if (value - i64::from(self.min)) % i64::from(self.step) != 0 {
            return Err(GoalValidationError::OffStep {
                label: self.label,
                value,
                step: self.step,
            });
        }
        Ok(value as u32)
    }

    /// Force a stored value into range
    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalValidationError {
    #[error("{label} must be between {min} and {max} (got {value})")]
    OutOfRange {
        label: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },
    #[error("{label} must be a multiple of {step} (got {value})")]
    OffStep {
        label: &'static str,
        value: i64,
        step: u32,
    },
}
