//! Admin authentication middleware
//!
//! Catalog and registry mutations require the token from the settings table,
//! passed in the X-Admin-Token header. A blank stored token disables the
//! check entirely. Read endpoints and lineup endpoints are public and never
//! pass through this middleware.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hymnal_common::api::auth::token_matches;
use serde_json::json;

use crate::AppState;

/// Header carrying the admin token
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Reject requests without a valid admin token
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Blank token disables auth checking
    if state.admin_token.is_empty() {
        return Ok(next.run(request).await);
    }

    let provided = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    if token_matches(&state.admin_token, provided) {
        Ok(next.run(request).await)
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Authentication error for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "Unauthorized. Admin token required.",
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
