//! # Domain Module
//!
//! Business logic of the meal tracker: what a food entry is, how the log
//! changes, and how entries roll up into daily and weekly views. Nothing in
//! here knows about files or the command line; storage arrives through the
//! traits in [`crate::backend::storage`].
//!
//! ## Module Organization
//!
//! - **models**: Food entries, goals and the derived summary types
//! - **commands**: Validated inputs and results of service calls
//! - **entry_mutations**: Pure add/update/delete transforms over a collection
//! - **aggregation**: Totals, progress, day filters, weekly pass/fail
//! - **food_log_service**: The session's working set plus persistence
//! - **goal_service**: Daily calorie and protein goals
//! - **summary_service**: Today, day detail, weekly and history views
//!
//! ## Business Rules
//!
//! - Entry ids never change once assigned
//! - Editing an entry keeps its original timestamp
//! - A day "meets the goal" only when both calories and protein reach their goals
//! - Days are calendar days in the caller's time zone

pub mod aggregation;
pub mod commands;
pub mod entry_mutations;
pub mod food_log_service;
pub mod goal_service;
pub mod models;
pub mod summary_service;

pub use food_log_service::{FoodLogError, FoodLogService};
pub use goal_service::GoalService;
pub use summary_service::SummaryService;
