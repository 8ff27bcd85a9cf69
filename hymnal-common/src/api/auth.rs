//! Admin token management
//!
//! Mutating catalog and registry endpoints are gated by a token held in the
//! settings table. The token is generated on first run; setting it to the
//! empty string disables the check entirely (useful for local setups and
//! tests). Callers pass the token explicitly in the `X-Admin-Token` header;
//! nothing is read from ambient browser state.
//!
//! This module contains only pure functions and database operations. The
//! HTTP middleware lives with the service code.

use crate::Result;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::SqlitePool;

/// Settings key holding the admin token
pub const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Length of a generated token
const TOKEN_LEN: usize = 48;

/// Load the admin token, generating and storing one if none exists yet.
///
/// Returns the empty string when auth has been explicitly disabled by
/// blanking the stored value.
pub async fn load_admin_token(db: &SqlitePool) -> Result<String> {
    let stored: Option<(String,)> =
        sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(ADMIN_TOKEN_KEY)
            .fetch_optional(db)
            .await?;

    match stored {
        Some((value,)) => Ok(value),
        None => initialize_admin_token(db).await,
    }
}

/// Generate a fresh random token and store it in the settings table.
pub async fn initialize_admin_token(db: &SqlitePool) -> Result<String> {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect();

    sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
        .bind(ADMIN_TOKEN_KEY)
        .bind(&token)
        .execute(db)
        .await?;

    Ok(token)
}

/// Check a provided token against the expected one.
///
/// An empty expected token disables the check.
pub fn token_matches(expected: &str, provided: Option<&str>) -> bool {
    if expected.is_empty() {
        return true;
    }
    provided == Some(expected)
}
