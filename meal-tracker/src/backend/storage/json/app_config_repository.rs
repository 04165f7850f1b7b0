//! # App Config Repository
//!
//! Installation-wide configuration in a single YAML file `config.yaml` at
//! the root of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_format_version: "1.0"
//! load_policy: fail_open
//! background_saves: false
//! created_at: "2025-12-05T19:30:00Z"
//! updated_at: "2025-12-05T19:35:00Z"
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;

use super::connection::{write_atomically, JsonConnection};
use crate::backend::storage::traits::LoadPolicy;

pub const CURRENT_DATA_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data format version for future migrations
    #[serde(default = "default_data_format_version")]
    pub data_format_version: String,
    /// How to treat an undecodable food log
    #[serde(default)]
    pub load_policy: LoadPolicy,
    /// Hand saves to a background writer instead of blocking on each one
    #[serde(default)]
    pub background_saves: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn default_data_format_version() -> String {
    CURRENT_DATA_FORMAT_VERSION.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            data_format_version: default_data_format_version(),
            load_policy: LoadPolicy::default(),
            background_saves: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfigRepository {
    connection: JsonConnection,
}

impl AppConfigRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Load the config, creating a default file on first use
    pub fn get_app_config(&self) -> Result<AppConfig> {
        let config_path = self.connection.config_file_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: AppConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
            debug!("Loaded app config from {}", config_path.display());
            Ok(config)
        } else {
            let config = AppConfig::default();
            self.save_app_config(&config)?;
            info!("Created default app config at {}", config_path.display());
            Ok(config)
        }
    }

    pub fn update_app_config(&self, config: &AppConfig) -> Result<()> {
        let mut updated_config = config.clone();
        updated_config.updated_at = Utc::now().to_rfc3339();
        self.save_app_config(&updated_config)?;
        info!("Updated app config");
        Ok(())
    }

    fn save_app_config(&self, config: &AppConfig) -> Result<()> {
        let config_path = self.connection.config_file_path();
        let yaml_content = serde_yaml::to_string(config)?;
        write_atomically(&config_path, yaml_content.as_bytes())?;
        debug!("Saved app config to {}", config_path.display());
        Ok(())
    }
}
