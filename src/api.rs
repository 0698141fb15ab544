//! Shared API Error Shape
//!
//! Every client-facing failure in the backend serializes to the same JSON
//! body so clients can branch on `code` and `blame` without inspecting
//! free-form messages.

use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// The uniform error payload returned by every endpoint on failure.
///
/// - `code`: a stable machine-readable identifier (e.g. `search_query_syntax`).
/// - `message`: a human-readable description of what went wrong.
/// - `blame`: who has to act to fix it (`"client"` for malformed requests,
///   `"user"` for bad user-supplied values).
/// - `retry`: whether resubmitting the identical request could succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub blame: String,
    pub retry: bool,
}

/// Acknowledgment returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub status: String,
}

impl ErrorBody {
    pub fn new(code: &str, message: impl Into<String>, blame: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            blame: blame.to_string(),
            retry: false,
        }
    }

    /// Convenience for handlers returning `(StatusCode, Json<ErrorBody>)`.
    pub fn respond(
        status: StatusCode,
        code: &str,
        message: impl Into<String>,
        blame: &str,
    ) -> (StatusCode, Json<ErrorBody>) {
        (status, Json(Self::new(code, message, blame)))
    }
}
