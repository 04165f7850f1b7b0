//! # Backend Module
//!
//! Domain services and storage for the meal tracker, with no knowledge of
//! how they are presented. The CLI builds one [`Backend`] per run and passes
//! it to its handlers.
//! - Synchronous operations (no async/await)
//! - One data directory per backend, chosen by the caller
//! - No global state: everything hangs off the `Backend` value

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::json::JsonConnection;

use domain::{FoodLogService, GoalService, SummaryService};
use storage::json::{AppConfig, AppConfigRepository, JsonEntryRepository, SettingsRepository};
use storage::{LoadPolicy, PersistMode};

/// Main backend struct that owns all services
pub struct Backend {
    pub food_log_service: FoodLogService,
    pub goal_service: GoalService,
    pub summary_service: SummaryService,
    pub app_config: AppConfig,
    connection: JsonConnection,
}

impl Backend {
    /// Wire the services to the data directory behind `connection` and load
    /// the food log. `load_policy_override` wins over the policy in
    /// `config.yaml`.
    pub fn new(connection: JsonConnection, load_policy_override: Option<LoadPolicy>) -> Result<Self> {
        let app_config = AppConfigRepository::new(connection.clone())
            .get_app_config()
            .context("Failed to load app config")?;

        let load_policy = load_policy_override.unwrap_or(app_config.load_policy);
        let persist_mode = if app_config.background_saves {
            PersistMode::Background
        } else {
            PersistMode::Immediate
        };
        info!(
            "Opening data directory {} ({:?}, {:?})",
            connection.base_directory().display(),
            load_policy,
            persist_mode
        );

        let entry_repository = Arc::new(JsonEntryRepository::new(connection.clone(), load_policy));
        let mut food_log_service = FoodLogService::new(entry_repository, persist_mode);
        food_log_service.load()?;

        let goal_service = GoalService::new(Arc::new(SettingsRepository::new(connection.clone())));

        Ok(Backend {
            food_log_service,
            goal_service,
            summary_service: SummaryService::new(),
            app_config,
            connection,
        })
    }

    /// Backend over the default data directory
    pub fn open_default(load_policy_override: Option<LoadPolicy>) -> Result<Self> {
        let connection = JsonConnection::new_default()?;
        Self::new(connection, load_policy_override)
    }

    pub fn connection(&self) -> &JsonConnection {
        &self.connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::entries::CreateFoodEntryCommand;
    use crate::backend::domain::models::food_entry::{MealType, ValidatedFoodInput};
    use crate::backend::domain::FoodLogError;
    use crate::backend::storage::StorageError;
    use tempfile::tempdir;

    fn add_oatmeal(backend: &mut Backend) {
        backend
            .food_log_service
            .add_entry(CreateFoodEntryCommand {
                input: ValidatedFoodInput::new("Oatmeal", 350, 12, MealType::Breakfast).unwrap(),
                date: None,
            })
            .unwrap();
    }

    #[test]
    fn test_new_backend_creates_default_config() {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        let backend = Backend::new(connection.clone(), None).unwrap();

        assert!(connection.config_file_path().exists());
        assert_eq!(backend.app_config.load_policy, LoadPolicy::FailOpen);
        assert!(backend.food_log_service.entries().is_empty());
        assert_eq!(backend.connection().base_directory(), temp_dir.path());
    }

    #[test]
    fn test_entries_survive_reopen() {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        {
            let mut backend = Backend::new(connection.clone(), None).unwrap();
            add_oatmeal(&mut backend);
        }

        let backend = Backend::new(connection, None).unwrap();
        assert_eq!(backend.food_log_service.entries().len(), 1);
        assert_eq!(backend.food_log_service.entries()[0].name, "Oatmeal");
    }

    #[test]
    fn test_background_saves_from_config() {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repository = AppConfigRepository::new(connection.clone());
        let mut config = repository.get_app_config().unwrap();
        config.background_saves = true;
        repository.update_app_config(&config).unwrap();

        {
            let mut backend = Backend::new(connection.clone(), None).unwrap();
            assert!(backend.app_config.background_saves);
            add_oatmeal(&mut backend);
            backend.food_log_service.flush().unwrap();
        }

        let backend = Backend::new(connection, None).unwrap();
        assert_eq!(backend.food_log_service.entries().len(), 1);
    }

    #[test]
    fn test_fail_closed_override_refuses_corrupt_log() {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        std::fs::write(connection.entries_file_path(), "[{\"id\": 12").unwrap();

        let err = Backend::new(connection.clone(), Some(LoadPolicy::FailClosed))
            .err()
            .expect("corrupt log should be refused");
        assert!(matches!(
            err.downcast_ref::<FoodLogError>(),
            Some(FoodLogError::Load(StorageError::Corrupt { .. }))
        ));

        // The configured default is fail-open
        let backend = Backend::new(connection, None).unwrap();
        assert!(backend.food_log_service.entries().is_empty());
    }
}
