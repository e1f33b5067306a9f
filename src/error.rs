//! Service error types with HTTP status code mapping.
//!
//! [`DevEventError`] is the central error type for the catalog, the booking
//! ledger and the REST layer. Each variant maps to a numeric error code, an
//! HTTP status code and a structured JSON error response.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::BookingId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "insufficient seats: requested 5, available 4",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`DevEventError`] for the ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum shared by every core operation.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
/// | 4000–4999 | Inventory       | 422 Unprocessable Entity     |
#[derive(Debug, thiserror::Error)]
pub enum DevEventError {
    /// Malformed or missing input.
    #[error("invalid request: {0}")]
    Validation(String),

    /// An event with the same normalized slug already exists.
    #[error("slug already exists: {0}")]
    DuplicateSlug(String),

    /// No event matches the given slug or id.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// No booking matches the given id.
    #[error("booking not found: {0}")]
    BookingNotFound(BookingId),

    /// The event does not have enough seats left for the booking.
    #[error("insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats {
        /// Seats requested by the booking.
        requested: i32,
        /// Seats available at the moment the request was rejected.
        available: i32,
    },

    /// Illegal booking or payment status transition.
    #[error("invalid state transition: {0}")]
    InvalidState(String),

    /// Underlying persistence failure.
    #[error("store error: {0}")]
    Store(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DevEventError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::BookingNotFound(_) => 2002,
            Self::DuplicateSlug(_) => 2003,
            Self::InvalidState(_) => 2004,
            Self::Internal(_) => 3000,
            Self::Store(_) => 3001,
            Self::InsufficientSeats { .. } => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::BookingNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateSlug(_) | Self::InvalidState(_) => StatusCode::CONFLICT,
            Self::InsufficientSeats { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message safe to show to end users.
    ///
    /// Storage and internal failures are replaced with a generic message so
    /// driver details never leak into responses.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(_) => "storage is temporarily unavailable".to_string(),
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for errors that signal an infrastructure fault rather
    /// than a business outcome.
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Internal(_))
    }
}

impl From<sqlx::Error> for DevEventError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<JsonRejection> for DevEventError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for DevEventError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for DevEventError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for DevEventError {
    fn into_response(self) -> Response {
        if self.is_server_fault() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
