//! Outcome of one synchronization attempt.

use std::fmt;
use thiserror::Error;

use super::ItemError;
use crate::domain::foundation::InspectionId;

/// Why a sync round failed as a whole. The local queue is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("malformed server response: {0}")]
    InvalidResponse(String),

    #[error("server rejected batch ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("local storage failed: {0}")]
    Storage(String),

    #[error("no authenticated identity")]
    Unauthenticated,
}

/// Terminal state of `sync()`.
///
/// Failures are data here, not errors: partial success is a normal
/// steady-state outcome and the caller decides when to try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResult {
    Success,
    PartialSuccess(Vec<ItemError>),
    Failure(SyncFailure),
    NoNetwork,
}

impl SyncResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncResult::Success)
    }

    /// Whether the caller should schedule another attempt.
    pub fn should_retry(&self) -> bool {
        matches!(self, SyncResult::Failure(_) | SyncResult::NoNetwork)
    }

    /// Ids the server refused, for flagging individually in the UI.
    pub fn failed_ids(&self) -> Vec<&InspectionId> {
        match self {
            SyncResult::PartialSuccess(errors) => errors.iter().map(|e| &e.id).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for SyncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncResult::Success => write!(f, "success"),
            SyncResult::PartialSuccess(errors) => write!(f, "partial success ({} rejected)", errors.len()),
            SyncResult::Failure(reason) => write!(f, "failure: {}", reason),
            SyncResult::NoNetwork => write!(f, "no network"),
        }
    }
}
