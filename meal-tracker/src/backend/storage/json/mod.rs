//! # JSON Storage Module
//!
//! File-based storage for the meal tracker. One data directory holds:
//!
//! ```text
//! data/
//! ├── config.yaml      installation config (load policy, background saves)
//! ├── settings.yaml    key-value preferences (goals)
//! └── food_log.json    every logged entry
//! ```
//!
//! All writes go through [`connection::write_atomically`].

pub mod app_config_repository;
pub mod connection;
pub mod entry_repository;
pub mod settings_repository;

#[cfg(test)]
pub mod test_utils;

pub use app_config_repository::{AppConfig, AppConfigRepository};
pub use connection::JsonConnection;
pub use entry_repository::JsonEntryRepository;
pub use settings_repository::SettingsRepository;
