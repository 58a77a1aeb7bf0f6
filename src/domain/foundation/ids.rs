//! Strongly-typed identifier value objects.
//!
//! Catalog identifiers (zone, element, criterion) are opaque strings chosen by
//! whoever authors the catalog. Inspection identifiers are generated locally as
//! UUIDs but accepted as any non-empty string, since the server may hand back
//! ids of its own format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier, rejecting empty or blank values.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a zone in the weighted catalog (e.g. "kitchen").
    ZoneId,
    "zone_id"
);

string_id!(
    /// Identifier of an element within a zone.
    ElementId,
    "element_id"
);

string_id!(
    /// Identifier of a criterion within an element.
    CriterionId,
    "criterion_id"
);

string_id!(
    /// Identifier of the residence being inspected.
    ResidenceId,
    "residence_id"
);

string_id!(
    /// Unique identifier of an inspection in the pending queue.
    InspectionId,
    "inspection_id"
);

impl InspectionId {
    /// Generates a fresh random identifier for a locally started inspection.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
