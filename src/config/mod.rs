//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `INSPECTION_SYNC` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use inspection_sync::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Syncing to {}", config.sync.endpoint_url);
//! ```

mod agent;
mod auth;
mod error;
mod storage;
mod sync;

pub use agent::{AgentConfig, Environment, LogFormat};
pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;
pub use sync::SyncConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub agent: AgentConfig,

    /// Local data directory
    #[serde(default)]
    pub storage: StorageConfig,

    /// Remote endpoint, timeouts and scheduling
    pub sync: SyncConfig,

    /// Device identity
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `INSPECTION_SYNC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `INSPECTION_SYNC__SYNC__ENDPOINT_URL=...` -> `sync.endpoint_url = ...`
    /// - `INSPECTION_SYNC__AUTH__API_TOKEN=...` -> `auth.api_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INSPECTION_SYNC")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.sync.validate(&self.agent.environment)?;
        self.auth.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.agent.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("INSPECTION_SYNC__SYNC__ENDPOINT_URL", "https://api.example.com/sync");
        env::set_var("INSPECTION_SYNC__AUTH__USER_ID", "inspector-7");
        env::set_var("INSPECTION_SYNC__AUTH__API_TOKEN", "tok_xxx");
    }

    fn clear_env() {
        for key in [
            "INSPECTION_SYNC__SYNC__ENDPOINT_URL",
            "INSPECTION_SYNC__SYNC__POLL_INTERVAL_SECS",
            "INSPECTION_SYNC__AUTH__USER_ID",
            "INSPECTION_SYNC__AUTH__API_TOKEN",
            "INSPECTION_SYNC__AGENT__ENVIRONMENT",
            "INSPECTION_SYNC__AGENT__LOG_FORMAT",
            "INSPECTION_SYNC__STORAGE__DATA_DIR",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.sync.endpoint_url, "https://api.example.com/sync");
        assert_eq!(config.auth.user_id, "inspector-7");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.agent.environment, Environment::Development);
        assert_eq!(config.agent.log_format, LogFormat::Pretty);
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.sync.poll_interval_secs, 60);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("INSPECTION_SYNC__AGENT__ENVIRONMENT", "production");
        env::set_var("INSPECTION_SYNC__AGENT__LOG_FORMAT", "json");
        env::set_var("INSPECTION_SYNC__SYNC__POLL_INTERVAL_SECS", "15");
        env::set_var("INSPECTION_SYNC__STORAGE__DATA_DIR", "/var/lib/inspection-sync");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.agent.log_format, LogFormat::Json);
        assert_eq!(config.sync.poll_interval_secs, 15);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/inspection-sync"));
    }

    #[test]
    fn test_missing_credentials_fail_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("INSPECTION_SYNC__SYNC__ENDPOINT_URL", "https://api.example.com/sync");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
