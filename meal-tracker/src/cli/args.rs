use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "meal-tracker")]
#[command(about = "Log meals and track daily calorie and protein goals")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Data directory (defaults to $MEAL_TRACKER_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    /// Refuse to start when the food log cannot be read
    #[arg(long, global = true)]
    pub fail_closed: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log a meal
    Add {
        /// What was eaten
        #[arg(short, long)]
        name: String,
        /// Calories (kcal)
        #[arg(short, long)]
        calories: String,
        /// Protein (grams)
        #[arg(short, long)]
        protein: String,
        /// breakfast, lunch, dinner or snack
        #[arg(short, long, default_value = "breakfast")]
        meal: String,
        /// When it was eaten, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Change an existing entry; omitted fields keep their value
    Edit {
        /// Entry ID
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        calories: Option<String>,
        #[arg(short, long)]
        protein: Option<String>,
        #[arg(short, long)]
        meal: Option<String>,
    },
    /// Remove an entry
    Delete {
        /// Entry ID
        id: String,
    },
    /// Today's entries and progress toward the goals
    Today,
    /// Entries and totals of one day
    Day {
        /// YYYY-MM-DD
        date: String,
    },
    /// Seven-day goal report
    Week {
        /// Last day of the week, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        ending: Option<String>,
    },
    /// Every logged day, most recent first
    History,
    /// Show or change the daily goals
    Goals {
        #[command(subcommand)]
        action: GoalsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum GoalsAction {
    /// Print the current goals
    Show,
    /// Change one or both goals
    Set {
        /// Daily calorie goal, a multiple of 50 up to 10000
        #[arg(long, allow_negative_numbers = true)]
        calories: Option<i64>,
        /// Daily protein goal in grams, a multiple of 5 up to 400
        #[arg(long, allow_negative_numbers = true)]
        protein: Option<i64>,
    },
}
