//! Device identity configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::Identity;

/// Credentials the agent submits batches with
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Inspector account id sent as `user` in every batch
    pub user_id: String,

    /// Bearer token for the sync endpoint
    pub api_token: Secret<String>,
}

impl AuthConfig {
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id.clone(), self.api_token.expose_secret().clone())
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__USER_ID"));
        }
        if self.api_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__API_TOKEN"));
        }
        Ok(())
    }
}
