//! Handler error responses
//!
//! Maps the shared error taxonomy to HTTP statuses. Validation and conflict
//! messages are passed through so the caller can fix the input; store and
//! internal failures are logged and surfaced generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hymnal_common::Error;
use serde_json::json;
use tracing::error;

/// Result type for HTTP handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper turning a core error into an HTTP response
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            other => {
                error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
