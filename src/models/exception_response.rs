//! # Error Response Payload
//!
//! Every error leaving the service is rendered as an [`ExceptionResponse`]:
//!
//! ```json
//! {
//!   "message": "VALIDATION FAILED",
//!   "error": ["email must be a well-formed email address"],
//!   "timestamp": "2024-05-01 13:37:00",
//!   "status": "PARTIAL_CONTENT"
//! }
//! ```
//!
//! The `error` list is omitted entirely when there are no field-level details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::utils::constant::TIMESTAMP_FORMAT;

/// Fixed messages used in error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionMessage {
    FieldValidationFailed,
}

impl ExceptionMessage {
    pub fn message(self) -> &'static str {
        match self {
            ExceptionMessage::FieldValidationFailed => "VALIDATION FAILED",
        }
    }
}

impl std::fmt::Display for ExceptionMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Uniform JSON error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ExceptionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<String>>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: PrimitiveDateTime,
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
}

impl ExceptionResponse {
    /// Creates a payload stamped with the current UTC time.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            message: message.into(),
            error: None,
            timestamp: PrimitiveDateTime::new(now.date(), now.time()),
            status,
        }
    }

    /// Attaches field-level error details.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.error = Some(errors);
        self
    }
}

impl IntoResponse for ExceptionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Returns the constant-style name of a status code, e.g. `PARTIAL_CONTENT`.
///
/// Codes without a canonical reason phrase fall back to their numeric form.
pub fn status_name(status: StatusCode) -> String {
    // Constant names that do not follow from the reason phrase.
    match status {
        StatusCode::RANGE_NOT_SATISFIABLE => return "REQUESTED_RANGE_NOT_SATISFIABLE".to_string(),
        StatusCode::IM_A_TEAPOT => return "I_AM_A_TEAPOT".to_string(),
        _ => {}
    }

    match status.canonical_reason() {
        Some(reason) => reason
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect(),
        None => status.as_u16().to_string(),
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&status_name(*status))
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &PrimitiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let formatted = timestamp
        .format(TIMESTAMP_FORMAT)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}
