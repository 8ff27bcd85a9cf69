//! Catalog queries
//!
//! Song status is computed once against the full registry at every write
//! (create, update, import) and stored with the row. Registry mutations
//! re-reconcile stored statuses separately (see banned_artists module).

use chrono::{DateTime, Utc};
use hymnal_common::db::models::{Song, SongStatus};
use hymnal_common::matching;
use hymnal_common::{Error, Result};
use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;
use uuid::Uuid;

use super::banned_artists;

/// Filters for the song list
#[derive(Debug, Default, Clone)]
pub struct SongFilter {
    /// Case-insensitive substring over title and artist
    pub search: Option<String>,
    pub status: Option<SongStatus>,
    pub category: Option<String>,
}

/// Fields accepted for a song create or update
#[derive(Debug, Clone)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub category: Option<String>,
    pub lyrics_link: Option<String>,
    pub youtube_link: Option<String>,
    pub musical_key: Option<String>,
    pub tempo_bpm: Option<i64>,
    pub time_signature: Option<String>,
}

impl NewSong {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.artist.trim().is_empty() {
            return Err(Error::Validation("title and artist are required".to_string()));
        }
        if let Some(bpm) = self.tempo_bpm {
            if !(1..=300).contains(&bpm) {
                return Err(Error::Validation(format!(
                    "tempo_bpm must be between 1 and 300, got {}",
                    bpm
                )));
            }
        }
        Ok(())
    }
}

/// One loosely-shaped row from a bulk import
///
/// Rows missing title or artist are dropped silently; only the aggregate
/// inserted count is reported.
#[derive(Debug, Clone, Deserialize)]
pub struct SongImportRow {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub category: Option<String>,
    pub lyrics_link: Option<String>,
}

/// Map a songs row (or a joined row containing all songs columns)
pub(crate) fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let id_text: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|e| Error::Internal(format!("invalid song id {:?}: {}", id_text, e)))?;

    let status_text: String = row.try_get("status")?;
    let status = SongStatus::parse(&status_text)
        .ok_or_else(|| Error::Internal(format!("invalid song status {:?}", status_text)))?;

    let date_added: DateTime<Utc> = row.try_get("date_added")?;

    Ok(Song {
        id,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        category: row.try_get("category")?,
        lyrics_link: row.try_get("lyrics_link")?,
        youtube_link: row.try_get("youtube_link")?,
        musical_key: row.try_get("musical_key")?,
        tempo_bpm: row.try_get("tempo_bpm")?,
        time_signature: row.try_get("time_signature")?,
        status,
        date_added,
    })
}

fn build_where(filter: &SongFilter) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut binds = Vec::new();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("(title LIKE ? OR artist LIKE ?)".to_string());
        let pattern = format!("%{}%", search);
        binds.push(pattern.clone());
        binds.push(pattern);
    }

    if let Some(status) = filter.status {
        clauses.push("status = ?".to_string());
        binds.push(status.as_str().to_string());
    }

    if let Some(category) = filter.category.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("category = ?".to_string());
        binds.push(category.to_string());
    }

    if clauses.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), binds)
    }
}

/// Count songs matching the filter
pub async fn count_songs(db: &SqlitePool, filter: &SongFilter) -> Result<i64> {
    let (where_sql, binds) = build_where(filter);
    let sql = format!("SELECT COUNT(*) FROM songs{}", where_sql);

    let mut query = sqlx::query_scalar(&sql);
    for bind in &binds {
        query = query.bind(bind);
    }

    Ok(query.fetch_one(db).await?)
}

/// List songs matching the filter, newest first
pub async fn list_songs(
    db: &SqlitePool,
    filter: &SongFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Song>> {
    let (where_sql, binds) = build_where(filter);
    let sql = format!(
        "SELECT * FROM songs{} ORDER BY date_added DESC LIMIT ? OFFSET ?",
        where_sql
    );

    let mut query = sqlx::query(&sql);
    for bind in &binds {
        query = query.bind(bind);
    }
    query = query.bind(limit).bind(offset);

    let rows = query.fetch_all(db).await?;
    rows.iter().map(song_from_row).collect()
}

/// Get one song by id
pub async fn get_song(db: &SqlitePool, id: Uuid) -> Result<Song> {
    let row = sqlx::query("SELECT * FROM songs WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("song {}", id)))?;

    song_from_row(&row)
}

/// Create a song, evaluating its status against the current registry
pub async fn create_song(db: &SqlitePool, new: NewSong) -> Result<Song> {
    new.validate()?;

    let registry = banned_artists::list_banned_artists(db).await?;
    let status = matching::evaluate_status(&new.artist, &registry);

    let id = Uuid::new_v4();
    let date_added = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO songs
            (id, title, artist, album, category, lyrics_link, youtube_link,
             musical_key, tempo_bpm, time_signature, status, date_added)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&new.title)
    .bind(&new.artist)
    .bind(&new.album)
    .bind(&new.category)
    .bind(&new.lyrics_link)
    .bind(&new.youtube_link)
    .bind(&new.musical_key)
    .bind(new.tempo_bpm)
    .bind(&new.time_signature)
    .bind(status.as_str())
    .bind(date_added)
    .execute(db)
    .await?;

    Ok(Song {
        id,
        title: new.title,
        artist: new.artist,
        album: new.album,
        category: new.category,
        lyrics_link: new.lyrics_link,
        youtube_link: new.youtube_link,
        musical_key: new.musical_key,
        tempo_bpm: new.tempo_bpm,
        time_signature: new.time_signature,
        status,
        date_added,
    })
}

/// Update a song, re-evaluating its status against the current registry
pub async fn update_song(db: &SqlitePool, id: Uuid, new: NewSong) -> Result<Song> {
    new.validate()?;

    // Existence check up front so a missing id is NotFound, not a no-op
    get_song(db, id).await?;

    let registry = banned_artists::list_banned_artists(db).await?;
    let status = matching::evaluate_status(&new.artist, &registry);

    sqlx::query(
        r#"
        UPDATE songs SET
            title = ?, artist = ?, album = ?, category = ?, lyrics_link = ?,
            youtube_link = ?, musical_key = ?, tempo_bpm = ?, time_signature = ?,
            status = ?
        WHERE id = ?
        "#,
    )
    .bind(&new.title)
    .bind(&new.artist)
    .bind(&new.album)
    .bind(&new.category)
    .bind(&new.lyrics_link)
    .bind(&new.youtube_link)
    .bind(&new.musical_key)
    .bind(new.tempo_bpm)
    .bind(&new.time_signature)
    .bind(status.as_str())
    .bind(id.to_string())
    .execute(db)
    .await?;

    get_song(db, id).await
}

/// Delete a song. Lineup entries referencing it are removed by the
/// foreign-key cascade.
pub async fn delete_song(db: &SqlitePool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id.to_string())
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("song {}", id)));
    }

    Ok(())
}

/// Import loosely-shaped song rows.
///
/// The registry is fetched once and reused across all rows. Rows without
/// title or artist are dropped; rows duplicating an existing song or an
/// earlier row in the same batch (by title + artist) are skipped. Returns
/// the number actually inserted.
pub async fn bulk_import_songs(db: &SqlitePool, rows: &[SongImportRow]) -> Result<u64> {
    let valid: Vec<NewSong> = rows
        .iter()
        .filter_map(|row| {
            let title = row.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
            let artist = row.artist.as_deref().map(str::trim).filter(|a| !a.is_empty())?;
            Some(NewSong {
                title: title.to_string(),
                artist: artist.to_string(),
                album: row.album.clone(),
                category: row.category.clone(),
                lyrics_link: row.lyrics_link.clone(),
                youtube_link: None,
                musical_key: None,
                tempo_bpm: None,
                time_signature: None,
            })
        })
        .collect();

    if valid.is_empty() {
        return Err(Error::Validation("no valid songs to import".to_string()));
    }

    let registry = banned_artists::list_banned_artists(db).await?;

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut inserted = 0u64;

    for song in valid {
        if !seen.insert((song.title.clone(), song.artist.clone())) {
            continue;
        }

        let exists: Option<(String,)> =
            sqlx::query_as("SELECT id FROM songs WHERE title = ? AND artist = ?")
                .bind(&song.title)
                .bind(&song.artist)
                .fetch_optional(db)
                .await?;
        if exists.is_some() {
            continue;
        }

        let status = matching::evaluate_status(&song.artist, &registry);

        sqlx::query(
            r#"
            INSERT INTO songs (id, title, artist, album, category, lyrics_link, status, date_added)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.album)
        .bind(&song.category)
        .bind(&song.lyrics_link)
        .bind(status.as_str())
        .bind(Utc::now())
        .execute(db)
        .await?;

        inserted += 1;
    }

    Ok(inserted)
}
