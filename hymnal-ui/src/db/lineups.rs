//! Worship lineup queries
//!
//! A lineup owns an ordered set of song references. Order is assigned from
//! submission order (0, 1, 2, ...) and the whole set is replaced on update,
//! never diffed. Duplicate song ids are allowed; a lineup is a sequence,
//! not a set.

use chrono::{DateTime, NaiveDate, Utc};
use hymnal_common::db::models::{Lineup, LineupEntry, LineupWithSongs};
use hymnal_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use super::is_foreign_key_violation;
use super::songs::song_from_row;

/// Fields accepted for a lineup create or replace
#[derive(Debug, Clone)]
pub struct LineupInput {
    pub name: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub song_ids: Vec<Uuid>,
}

impl LineupInput {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("lineup name is required".to_string()));
        }
        if self.song_ids.is_empty() {
            return Err(Error::Validation("at least one song is required".to_string()));
        }
        Ok(())
    }
}

fn lineup_from_row(row: &SqliteRow) -> Result<Lineup> {
    let id_text: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|e| Error::Internal(format!("invalid lineup id {:?}: {}", id_text, e)))?;

    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Lineup {
        id,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        date: row.try_get("date")?,
        created_at,
    })
}

/// Create a lineup with its ordered song set
pub async fn create_lineup(db: &SqlitePool, input: &LineupInput) -> Result<LineupWithSongs> {
    input.validate()?;

    let id = Uuid::new_v4();
    let created_at = Utc::now();

    let mut tx = db.begin().await?;

    sqlx::query("INSERT INTO lineups (id, name, description, date, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(id.to_string())
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.date)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

    insert_entries(&mut tx, id, &input.song_ids).await?;

    tx.commit().await?;

    get_lineup(db, id).await
}

/// Replace a lineup's fields and its entire ordered song set
pub async fn replace_lineup(
    db: &SqlitePool,
    id: Uuid,
    input: &LineupInput,
) -> Result<LineupWithSongs> {
    input.validate()?;

    let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM lineups WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(db)
        .await?;
    if exists.is_none() {
        return Err(Error::NotFound(format!("lineup {}", id)));
    }

    let mut tx = db.begin().await?;

    sqlx::query("UPDATE lineups SET name = ?, description = ?, date = ? WHERE id = ?")
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.date)
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

    // Full replacement: discard the old ordered set, write a fresh one
    sqlx::query("DELETE FROM lineup_songs WHERE lineup_id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

    insert_entries(&mut tx, id, &input.song_ids).await?;

    tx.commit().await?;

    get_lineup(db, id).await
}

/// Get one lineup with songs ordered by position
pub async fn get_lineup(db: &SqlitePool, id: Uuid) -> Result<LineupWithSongs> {
    let row = sqlx::query("SELECT id, name, description, date, created_at FROM lineups WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("lineup {}", id)))?;

    let lineup = lineup_from_row(&row)?;
    let songs = fetch_entries(db, id).await?;

    Ok(LineupWithSongs { lineup, songs })
}

/// All lineups, newest first, each with its ordered songs
pub async fn list_lineups(db: &SqlitePool) -> Result<Vec<LineupWithSongs>> {
    let rows = sqlx::query("SELECT id, name, description, date, created_at FROM lineups ORDER BY created_at DESC")
        .fetch_all(db)
        .await?;

    let mut lineups = Vec::with_capacity(rows.len());
    for row in &rows {
        let lineup = lineup_from_row(row)?;
        let songs = fetch_entries(db, lineup.id).await?;
        lineups.push(LineupWithSongs { lineup, songs });
    }

    Ok(lineups)
}

/// Delete a lineup; its entries cascade away, song rows are untouched
pub async fn delete_lineup(db: &SqlitePool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM lineups WHERE id = ?")
        .bind(id.to_string())
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("lineup {}", id)));
    }

    Ok(())
}

async fn insert_entries(
    tx: &mut Transaction<'_, Sqlite>,
    lineup_id: Uuid,
    song_ids: &[Uuid],
) -> Result<()> {
    for (index, song_id) in song_ids.iter().enumerate() {
        let insert = sqlx::query(
            "INSERT INTO lineup_songs (id, lineup_id, song_id, song_order) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(lineup_id.to_string())
        .bind(song_id.to_string())
        .bind(index as i64)
        .execute(&mut **tx)
        .await;

        match insert {
            Ok(_) => {}
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(Error::Validation(format!("unknown song id: {}", song_id)));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

async fn fetch_entries(db: &SqlitePool, lineup_id: Uuid) -> Result<Vec<LineupEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT s.*, ls.song_order
        FROM lineup_songs ls
        JOIN songs s ON ls.song_id = s.id
        WHERE ls.lineup_id = ?
        ORDER BY ls.song_order ASC
        "#,
    )
    .bind(lineup_id.to_string())
    .fetch_all(db)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(LineupEntry {
                order: row.try_get("song_order")?,
                song: song_from_row(row)?,
            })
        })
        .collect()
}
