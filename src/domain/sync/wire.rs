//! Batch wire format - what is sent to and read back from the remote endpoint.
//!
//! Request:
//!
//! ```json
//! { "user": "inspector-7", "sent_at": "2024-05-14T09:00:00Z", "controls": [ ... ] }
//! ```
//!
//! Response, accepted:
//!
//! ```json
//! { "status": true, "data": { "saved": [{ "id": "...", "date": "2024-05-14" }],
//!                             "error": [{ "id": "...", "txt": "..." }] } }
//! ```
//!
//! Response, rejected:
//!
//! ```json
//! { "status": false, "error": { "code": 401, "txt": "bad token" } }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, InspectionId, Timestamp};
use crate::domain::inspection::Inspection;

/// Request body for one batch submission.
#[derive(Debug, Serialize)]
pub struct BatchPayload<'a> {
    pub user: &'a str,
    pub sent_at: String,
    pub controls: Vec<&'a Inspection>,
}

impl<'a> BatchPayload<'a> {
    pub fn new(user: &'a str, controls: impl IntoIterator<Item = &'a Inspection>, at: Timestamp) -> Self {
        Self {
            user,
            sent_at: at.to_rfc3339(),
            controls: controls.into_iter().collect(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(self).map_err(DomainError::unknown)
    }
}

/// Canonical fields the server returns for an accepted inspection.
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedInspection {
    pub id: InspectionId,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub saved_on_server: Option<bool>,
    #[serde(default)]
    pub remote_id: Option<String>,
}

impl AcceptedInspection {
    /// Copies the confirmed fields onto the local record.
    pub fn apply_to(&self, inspection: &mut Inspection) {
        inspection.apply_server_fields(self.date, self.saved_on_server, self.remote_id.clone());
    }
}

/// Per-item rejection reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub id: InspectionId,
    #[serde(rename = "txt")]
    pub message: String,
}

/// Parsed server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchResponse {
    Accepted {
        saved: Vec<AcceptedInspection>,
        errors: Vec<ItemError>,
    },
    Rejected {
        code: String,
        message: String,
    },
}

#[derive(Deserialize)]
struct RawResponse {
    status: bool,
    #[serde(default)]
    data: Option<RawData>,
    #[serde(default)]
    error: Option<RawServerError>,
}

#[derive(Deserialize)]
struct RawData {
    #[serde(default)]
    saved: Vec<AcceptedInspection>,
    #[serde(default)]
    error: Vec<ItemError>,
}

#[derive(Deserialize)]
struct RawServerError {
    #[serde(default)]
    code: serde_json::Value,
    #[serde(default)]
    txt: String,
}

impl BatchResponse {
    /// Parses a raw response body.
    ///
    /// # Errors
    ///
    /// - `InvalidResponse` if the body is not JSON of the expected shape, or
    ///   claims success without a `data` object
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let parsed: RawResponse =
            serde_json::from_str(raw).map_err(|e| DomainError::InvalidResponse(e.to_string()))?;

        if parsed.status {
            let data = parsed
                .data
                .ok_or_else(|| DomainError::InvalidResponse("status true without data".to_string()))?;
            return Ok(BatchResponse::Accepted {
                saved: data.saved,
                errors: data.error,
            });
        }

        let error = parsed.error.unwrap_or(RawServerError {
            code: serde_json::Value::Null,
            txt: String::new(),
        });
        let code = match error.code {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        Ok(BatchResponse::Rejected {
            code,
            message: error.txt,
        })
    }
}
