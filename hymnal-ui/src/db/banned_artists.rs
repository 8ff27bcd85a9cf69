//! Banned-artist registry queries and status reconciliation
//!
//! Adding an entry marks every matching song Not Allowed. Removing an entry
//! recomputes each previously-matching song against the remaining registry;
//! a song covered by two entries stays Not Allowed when only one is removed.
//! Both passes are idempotent, so a retried request converges to the same
//! statuses.

use hymnal_common::db::models::{BannedArtist, SongStatus};
use hymnal_common::matching;
use hymnal_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use super::is_unique_violation;

/// Outcome of a bulk registry import
#[derive(Debug, Clone, Copy)]
pub struct BulkAddOutcome {
    pub added: u64,
    pub skipped: u64,
}

/// All registry entries, sorted by name
pub async fn list_banned_artists(db: &SqlitePool) -> Result<Vec<BannedArtist>> {
    let rows: Vec<(String, String, Option<String>)> = sqlx::query_as(
        "SELECT id, artist_name, reason FROM banned_artists ORDER BY artist_name COLLATE NOCASE ASC",
    )
    .fetch_all(db)
    .await?;

    rows.into_iter()
        .map(|(id, artist_name, reason)| {
            let id = Uuid::parse_str(&id)
                .map_err(|e| Error::Internal(format!("invalid banned artist id {:?}: {}", id, e)))?;
            Ok(BannedArtist { id, artist_name, reason })
        })
        .collect()
}

/// Add a registry entry, then mark every matching song Not Allowed.
///
/// Fails with Conflict when the name is already present (case-insensitive).
pub async fn add_banned_artist(
    db: &SqlitePool,
    artist_name: &str,
    reason: Option<&str>,
) -> Result<BannedArtist> {
    let name = artist_name.trim();
    if name.is_empty() {
        return Err(Error::Validation("artist_name is required".to_string()));
    }

    let id = Uuid::new_v4();
    let insert = sqlx::query("INSERT INTO banned_artists (id, artist_name, reason) VALUES (?, ?, ?)")
        .bind(id.to_string())
        .bind(name)
        .bind(reason)
        .execute(db)
        .await;

    match insert {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(Error::Conflict(format!("artist already in banned list: {}", name)));
        }
        Err(e) => return Err(e.into()),
    }

    let flipped = reconcile_after_add(db, name).await?;
    info!("Banned artist {:?} added, {} song(s) marked Not Allowed", name, flipped);

    Ok(BannedArtist {
        id,
        artist_name: name.to_string(),
        reason: reason.map(str::to_string),
    })
}

/// Remove a registry entry, then recompute every song it used to match.
pub async fn remove_banned_artist(db: &SqlitePool, id: Uuid) -> Result<()> {
    let removed: Option<(String,)> =
        sqlx::query_as("SELECT artist_name FROM banned_artists WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(db)
            .await?;

    let Some((removed_name,)) = removed else {
        return Err(Error::NotFound(format!("banned artist {}", id)));
    };

    sqlx::query("DELETE FROM banned_artists WHERE id = ?")
        .bind(id.to_string())
        .execute(db)
        .await?;

    // The removed entry may not have been the only one covering a song,
    // so each affected song is recomputed against the remaining registry
    // rather than flipped straight back to Allowed.
    let remaining = list_banned_artists(db).await?;
    let mut reverted = 0u64;

    for (song_id, artist, status) in fetch_artist_index(db).await? {
        if !matching::artist_matches(&artist, &removed_name) {
            continue;
        }

        let recomputed = matching::evaluate_status(&artist, &remaining);
        if recomputed.as_str() != status {
            set_song_status(db, &song_id, recomputed).await?;
            reverted += 1;
        }
    }

    info!(
        "Banned artist {:?} removed, {} song(s) recomputed to a new status",
        removed_name, reverted
    );

    Ok(())
}

/// Import a list of names. Empty entries and duplicates count as skipped;
/// the batch is best-effort and never fails part-way over one bad name.
pub async fn bulk_add_banned_artists(db: &SqlitePool, names: &[String]) -> Result<BulkAddOutcome> {
    let mut added = 0u64;
    let mut skipped = 0u64;

    for raw in names {
        let name = raw.trim();
        if name.is_empty() {
            skipped += 1;
            continue;
        }

        match add_banned_artist(db, name, None).await {
            Ok(_) => added += 1,
            Err(Error::Conflict(_)) => skipped += 1,
            Err(e) => {
                warn!("Skipping banned artist {:?}: {}", name, e);
                skipped += 1;
            }
        }
    }

    Ok(BulkAddOutcome { added, skipped })
}

/// Mark every song matching the new entry Not Allowed. Songs already
/// Not Allowed (from another entry) are left untouched. Returns the number
/// of songs flipped.
async fn reconcile_after_add(db: &SqlitePool, banned_name: &str) -> Result<u64> {
    let mut flipped = 0u64;

    for (song_id, artist, status) in fetch_artist_index(db).await? {
        if status == SongStatus::NotAllowed.as_str() {
            continue;
        }
        if matching::artist_matches(&artist, banned_name) {
            set_song_status(db, &song_id, SongStatus::NotAllowed).await?;
            flipped += 1;
        }
    }

    Ok(flipped)
}

/// (id, artist, status) for every catalog song
async fn fetch_artist_index(db: &SqlitePool) -> Result<Vec<(String, String, String)>> {
    Ok(sqlx::query_as("SELECT id, artist, status FROM songs")
        .fetch_all(db)
        .await?)
}

async fn set_song_status(db: &SqlitePool, song_id: &str, status: SongStatus) -> Result<()> {
    sqlx::query("UPDATE songs SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(song_id)
        .execute(db)
        .await?;

    Ok(())
}
