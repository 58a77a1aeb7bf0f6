//! Sync endpoint configuration

use serde::Deserialize;
use std::time::Duration;

use super::agent::Environment;
use super::error::ValidationError;

/// Remote endpoint and scheduling settings
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Batch submission endpoint
    pub endpoint_url: String,

    /// URL probed for reachability (defaults to the endpoint)
    pub connectivity_url: Option<String>,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Extra attempts after a connect error or timeout
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Seconds between background sync rounds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl SyncConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn connectivity_url(&self) -> &str {
        self.connectivity_url.as_deref().unwrap_or(&self.endpoint_url)
    }

    /// Validate sync configuration
    ///
    /// In production, requires HTTPS for every URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.endpoint_url.is_empty() {
            return Err(ValidationError::MissingRequired("SYNC__ENDPOINT_URL"));
        }
        for url in [self.endpoint_url.as_str(), self.connectivity_url()] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidEndpointUrl(url.to_string()));
            }
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::EndpointMustBeHttps);
            }
        }

        if !(1..=300).contains(&self.connect_timeout_secs) {
            return Err(ValidationError::InvalidTimeout("connect"));
        }
        if !(1..=300).contains(&self.read_timeout_secs) {
            return Err(ValidationError::InvalidTimeout("read"));
        }
        if self.max_retries > 10 {
            return Err(ValidationError::TooManyRetries);
        }
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            connectivity_url: None,
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            max_retries: default_max_retries(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_poll_interval() -> u64 {
    60
}
