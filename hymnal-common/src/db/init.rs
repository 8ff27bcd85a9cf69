//! Database initialization
//!
//! Creates the database file on first run and brings the schema up to date.
//! All statements are idempotent, so calling this on every startup is safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Current schema version, stored in the settings table
const SCHEMA_VERSION: i64 = 1;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Foreign keys enforce the lineup_songs -> songs cascade
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while a reconciliation pass writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_settings_table(&pool).await?;
    create_songs_table(&pool).await?;
    create_banned_artists_table(&pool).await?;
    create_lineups_table(&pool).await?;
    create_lineup_songs_table(&pool).await?;

    init_default_settings(&pool).await?;

    Ok(pool)
}

async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            album TEXT,
            category TEXT,
            lyrics_link TEXT,
            youtube_link TEXT,
            musical_key TEXT,
            tempo_bpm INTEGER,
            time_signature TEXT,
            status TEXT NOT NULL DEFAULT 'Allowed',
            date_added TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_date_added ON songs(date_added)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_banned_artists_table(pool: &SqlitePool) -> Result<()> {
    // NOCASE collation makes the uniqueness check case-insensitive
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS banned_artists (
            id TEXT PRIMARY KEY,
            artist_name TEXT NOT NULL COLLATE NOCASE UNIQUE,
            reason TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_lineups_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lineups (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            date TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_lineup_songs_table(pool: &SqlitePool) -> Result<()> {
    // song_id cascades so deleting a song removes it from every lineup
    // instead of leaving a dangling reference
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lineup_songs (
            id TEXT PRIMARY KEY,
            lineup_id TEXT NOT NULL REFERENCES lineups(id) ON DELETE CASCADE,
            song_id TEXT NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
            song_order INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_lineup_songs_lineup ON lineup_songs(lineup_id, song_order)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES ('schema_version', ?)")
        .bind(SCHEMA_VERSION.to_string())
        .execute(pool)
        .await?;

    Ok(())
}
