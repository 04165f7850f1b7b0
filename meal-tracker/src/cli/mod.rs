//! # Command Line Front End
//!
//! Parses arguments with clap, runs them against a [`crate::backend::Backend`]
//! and prints either text or the `shared` DTOs as JSON.

pub mod args;
pub mod handlers;
pub mod mappers;
pub mod render;

pub use args::Cli;
pub use handlers::run;
