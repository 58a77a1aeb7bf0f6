//! Batch Transport Port - sends the serialized queue to the remote endpoint.
//!
//! Timeouts and the small fixed retry count live in the implementation, not
//! in the caller. Re-sending an already accepted inspection is harmless on the
//! server side.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::DomainError;

/// Authenticated identity attached to a batch.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    token: Secret<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: Secret::new(token.into()),
        }
    }

    /// Exposes the token (for building request headers).
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Errors raised by a transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Network error: {0}")]
    Network(String),
}

impl TransportError {
    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, TransportError::Timeout { .. } | TransportError::Connect(_))
    }
}

impl From<TransportError> for DomainError {
    fn from(err: TransportError) -> Self {
        DomainError::NetworkError(err.to_string())
    }
}

/// Port for submitting a batch in one request.
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Submit `payload` on behalf of `identity` and return the raw body.
    async fn submit_batch(&self, payload: &[u8], identity: &Identity) -> Result<String, TransportError>;
}

/// Port for resolving who is submitting.
///
/// Credential storage itself lives outside this crate.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current authenticated identity, or `None` when logged out.
    async fn current_identity(&self) -> Result<Option<Identity>, DomainError>;
}
