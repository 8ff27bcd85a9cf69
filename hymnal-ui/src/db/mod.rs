//! Database query layer for hymnal-ui
//!
//! Catalog, registry, and lineup operations. Registry mutations run the
//! reconciliation passes that keep song statuses consistent.

pub mod banned_artists;
pub mod lineups;
pub mod songs;

/// True when the error is a unique-constraint violation
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// True when the error is a foreign-key violation
pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
