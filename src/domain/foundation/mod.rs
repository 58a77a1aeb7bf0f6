//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the inspection domain.

mod errors;
mod ids;
mod score;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CriterionId, ElementId, InspectionId, ResidenceId, ZoneId};
pub use score::Score;
pub use timestamp::Timestamp;
