//! HTTP API handlers for hymnal-ui

pub mod auth;
pub mod banned;
pub mod error;
pub mod health;
pub mod lineups;
pub mod songs;

pub use auth::admin_auth_middleware;
pub use error::{ApiError, ApiResult};
pub use health::health_routes;
