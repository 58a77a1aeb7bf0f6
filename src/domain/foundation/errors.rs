//! Error types for the domain layer.

use std::error::Error;
use std::fmt;
use thiserror::Error;

use super::{CriterionId, InspectionId, ZoneId};

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes exposed at the UI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ZoneNotFound,
    InspectionNotFound,
    InvalidIndex,
    InvalidInput,
    NetworkError,
    InvalidResponse,
    UnknownError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ZoneNotFound => "ZONE_NOT_FOUND",
            ErrorCode::InspectionNotFound => "INSPECTION_NOT_FOUND",
            ErrorCode::InvalidIndex => "INVALID_INDEX",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Failures raised by the catalog loader, grid store and handlers.
///
/// Misuse conditions (`ZoneNotFound`, `InvalidIndex`, `InvalidInput`) must not
/// be retried blindly. `UnknownError` keeps the original cause reachable via
/// [`Error::source`].
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Zone not found in catalog: {0}")]
    ZoneNotFound(ZoneId),

    #[error("Inspection not found: {0}")]
    InspectionNotFound(InspectionId),

    #[error("Invalid element index {index} (zone has {len} elements)")]
    InvalidElementIndex { index: usize, len: usize },

    #[error("Criterion '{criterion}' not found in element {index}")]
    InvalidCriterion { index: usize, criterion: CriterionId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected failure: {0}")]
    UnknownError(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl DomainError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }

    /// Wraps an unexpected failure, keeping it as the error source.
    pub fn unknown(source: impl Error + Send + Sync + 'static) -> Self {
        DomainError::UnknownError(Box::new(source))
    }

    /// Returns the boundary error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::ZoneNotFound(_) => ErrorCode::ZoneNotFound,
            DomainError::InspectionNotFound(_) => ErrorCode::InspectionNotFound,
            DomainError::InvalidElementIndex { .. } | DomainError::InvalidCriterion { .. } => {
                ErrorCode::InvalidIndex
            }
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::NetworkError(_) => ErrorCode::NetworkError,
            DomainError::InvalidResponse(_) => ErrorCode::InvalidResponse,
            DomainError::UnknownError(_) => ErrorCode::UnknownError,
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::InvalidInput(err.to_string())
    }
}
