//! Application error taxonomy and HTTP mapping.
//!
//! The core distinguishes four failure classes:
//!
//! - [`AppError::NotFound`] — the identifier does not resolve to an enabled link (404)
//! - [`AppError::Store`] — the backing store failed; never conflated with NotFound (500)
//! - [`AppError::TimeRange`] — invalid or over-wide statistics window (400)
//! - [`AppError::Validation`] — malformed request input (400)
//!
//! Engagement append failures are not represented here: they are logged by the
//! worker and never surface to the caller, since losing one analytics event is
//! preferable to failing a live redirect.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::time_range::TimeRangeError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Errors surfaced by services and handlers.
///
/// `Clone` is required: the memoizing resolver broadcasts a failed load to every
/// coalesced waiter of the same in-flight lookup.
#[derive(Debug, Clone)]
pub enum AppError {
    Validation { message: String, details: Value },
    TimeRange { message: String },
    NotFound { message: String, details: Value },
    Store { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn time_range(message: impl Into<String>) -> Self {
        Self::TimeRange {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. } => write!(f, "validation error: {}", message),
            AppError::TimeRange { message } => write!(f, "time range error: {}", message),
            AppError::NotFound { message, .. } => write!(f, "not found: {}", message),
            AppError::Store { message, .. } => write!(f, "store error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::TimeRange { message } => (
                StatusCode::BAD_REQUEST,
                "time_range_error",
                message,
                json!({}),
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Store { message, details } => {
                tracing::error!(%message, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    message,
                    details,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::store("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<TimeRangeError> for AppError {
    fn from(e: TimeRangeError) -> Self {
        AppError::time_range(e.to_string())
    }
}
