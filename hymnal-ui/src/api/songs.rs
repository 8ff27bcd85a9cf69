//! Song catalog endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hymnal_common::db::models::{Song, SongStatus};
use hymnal_common::matching;
use hymnal_common::Error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::ApiResult;
use crate::db::songs::{NewSong, SongFilter, SongImportRow};
use crate::pagination::{calculate_pagination, DEFAULT_LIMIT};
use crate::{db, AppState};

/// Query parameters for the song list
#[derive(Debug, Deserialize)]
pub struct SongListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Page size, clamped server-side
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Pagination metadata echoed back with the song list
#[derive(Debug, Serialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Song plus the reason it is banned, derived at read time
#[derive(Debug, Serialize)]
pub struct AnnotatedSong {
    #[serde(flatten)]
    pub song: Song,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banned_reason: Option<String>,
}

/// Song list response
#[derive(Debug, Serialize)]
pub struct SongListResponse {
    pub songs: Vec<AnnotatedSong>,
    pub pagination: PaginationInfo,
}

/// Fields for a song create or update request
#[derive(Debug, Deserialize)]
pub struct SongRequest {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub category: Option<String>,
    pub lyrics_link: Option<String>,
    pub youtube_link: Option<String>,
    pub musical_key: Option<String>,
    pub tempo_bpm: Option<i64>,
    pub time_signature: Option<String>,
}

impl SongRequest {
    fn into_new_song(self) -> NewSong {
        NewSong {
            title: self.title.unwrap_or_default(),
            artist: self.artist.unwrap_or_default(),
            album: self.album,
            category: self.category,
            lyrics_link: self.lyrics_link,
            youtube_link: self.youtube_link,
            musical_key: self.musical_key,
            tempo_bpm: self.tempo_bpm,
            time_signature: self.time_signature,
        }
    }
}

/// Bulk import request body
#[derive(Debug, Deserialize)]
pub struct BulkSongRequest {
    pub songs: Option<Vec<SongImportRow>>,
}

/// Bulk import response
#[derive(Debug, Serialize)]
pub struct BulkSongResponse {
    pub message: String,
    pub count: u64,
}

/// GET /api/songs
///
/// Filtered, paginated song list, newest first. Not Allowed songs carry the
/// reason of a matching registry entry, looked up at read time rather than
/// stored with the song.
pub async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<SongListQuery>,
) -> ApiResult<Json<SongListResponse>> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => Some(
            SongStatus::parse(s)
                .ok_or_else(|| Error::Validation(format!("unknown status filter: {}", s)))?,
        ),
        None => None,
    };

    let filter = SongFilter {
        search: query.search.clone(),
        status,
        category: query.category.clone(),
    };

    let total = db::songs::count_songs(&state.db, &filter).await?;
    let p = calculate_pagination(total, query.page, query.limit);
    let songs = db::songs::list_songs(&state.db, &filter, p.limit, p.offset).await?;

    let registry = db::banned_artists::list_banned_artists(&state.db).await?;
    let songs = songs
        .into_iter()
        .map(|song| {
            let banned_reason = match song.status {
                SongStatus::NotAllowed => matching::find_matching_entry(&song.artist, &registry)
                    .and_then(|entry| entry.reason.clone()),
                SongStatus::Allowed => None,
            };
            AnnotatedSong { song, banned_reason }
        })
        .collect();

    Ok(Json(SongListResponse {
        songs,
        pagination: PaginationInfo {
            page: p.page,
            limit: p.limit,
            total,
            total_pages: p.total_pages,
        },
    }))
}

/// GET /api/songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Song>> {
    let song = db::songs::get_song(&state.db, id).await?;
    Ok(Json(song))
}

/// POST /api/songs
pub async fn create_song(
    State(state): State<AppState>,
    Json(req): Json<SongRequest>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let song = db::songs::create_song(&state.db, req.into_new_song()).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/songs/:id
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SongRequest>,
) -> ApiResult<Json<Song>> {
    let song = db::songs::update_song(&state.db, id, req.into_new_song()).await?;
    Ok(Json(song))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    db::songs::delete_song(&state.db, id).await?;
    Ok(Json(json!({ "message": "Song deleted successfully" })))
}

/// POST /api/songs/bulk
pub async fn bulk_import_songs(
    State(state): State<AppState>,
    Json(req): Json<BulkSongRequest>,
) -> ApiResult<Json<BulkSongResponse>> {
    let rows = req.songs.unwrap_or_default();
    if rows.is_empty() {
        return Err(Error::Validation("songs array is required".to_string()).into());
    }

    let count = db::songs::bulk_import_songs(&state.db, &rows).await?;

    Ok(Json(BulkSongResponse {
        message: format!("Successfully imported {} song(s)", count),
        count,
    }))
}
