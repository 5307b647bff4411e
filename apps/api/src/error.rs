//! # API Error Type
//!
//! Unified error type for route handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Handler returns Result<T, ApiError>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CoreError (tab-core) ──From──► ApiError { code, message }             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  IntoResponse: code ──► HTTP status, body = JSON error                 │
//! │                                                                         │
//! │  Client:                                                                │
//! │    { "code": "INVALID_ITEM_INDEX",                                      │
//! │      "message": "Item index 5 is out of range (bill has 2 items)" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note the forgiving cases that never reach this type: unparseable tax
//! and tip input coerces to zero in tab-core's parse helpers, and a bill
//! with no items summarizes to zeros.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use tab_core::CoreError;

/// API error returned from route handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Bill not found: 7c0e..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Claimed index outside the item sequence (422)
    InvalidItemIndex,

    /// Business rule violation (422)
    BusinessLogic,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidItemIndex | ErrorCode::BusinessLogic => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidItemIndex { .. } => {
                ApiError::new(ErrorCode::InvalidItemIndex, err.to_string())
            }
            CoreError::PersonNotFound(id) => ApiError::not_found("Person", id),
            CoreError::TooManyItems { .. } | CoreError::TooManyPeople { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
