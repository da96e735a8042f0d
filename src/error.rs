// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::store::StoreError;

/// Generic message sent with every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Message shared by the create and update paths when an email is taken.
pub const EMAIL_IN_USE: &str = "Email is already in use.";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error, carries the raw failure text
    Internal { details: String },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Internal { .. } => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Internal { details } => json!({
                "error": INTERNAL_ERROR_MESSAGE,
                "details": details,
            }),
            _ => json!({ "error": self.message() }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(details: impl Into<String>) -> Self {
        ApiError::Internal {
            details: details.into(),
        }
    }

    pub fn user_not_found(id: i64) -> Self {
        ApiError::not_found(format!("User with ID {} not found.", id))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // A concurrent writer beat the read-then-check; same answer as the check itself
            StoreError::DuplicateEmail(_) => ApiError::bad_request(EMAIL_IN_USE),
            // Row vanished between lookup and write
            StoreError::Missing(id) => ApiError::user_not_found(id),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Internal { details } => write!(f, "{}: {}", INTERNAL_ERROR_MESSAGE, details),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Internal { details } = &self {
            tracing::error!("Unhandled failure: {}", details);
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
