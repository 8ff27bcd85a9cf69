//! Banned-artist registry endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hymnal_common::db::models::BannedArtist;
use hymnal_common::Error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::ApiResult;
use crate::{db, AppState};

/// Fields for a registry add request
#[derive(Debug, Deserialize)]
pub struct BannedArtistRequest {
    pub artist_name: Option<String>,
    pub reason: Option<String>,
}

/// Bulk registry import request body
#[derive(Debug, Deserialize)]
pub struct BulkBannedRequest {
    pub artists: Option<Vec<String>>,
}

/// Bulk registry import response
#[derive(Debug, Serialize)]
pub struct BulkBannedResponse {
    pub message: String,
    pub count: u64,
    pub skipped: u64,
}

/// GET /api/banned-artists
pub async fn list_banned_artists(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<BannedArtist>>> {
    let entries = db::banned_artists::list_banned_artists(&state.db).await?;
    Ok(Json(entries))
}

/// POST /api/banned-artists
///
/// Adds the entry and marks every matching song Not Allowed. 409 when the
/// name is already present (case-insensitive).
pub async fn create_banned_artist(
    State(state): State<AppState>,
    Json(req): Json<BannedArtistRequest>,
) -> ApiResult<(StatusCode, Json<BannedArtist>)> {
    let name = req.artist_name.unwrap_or_default();
    let entry =
        db::banned_artists::add_banned_artist(&state.db, &name, req.reason.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/banned-artists/:id
///
/// Removes the entry and recomputes every song it used to match against the
/// remaining registry.
pub async fn delete_banned_artist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    db::banned_artists::remove_banned_artist(&state.db, id).await?;
    Ok(Json(json!({ "message": "Banned artist deleted successfully" })))
}

/// POST /api/banned-artists/bulk
pub async fn bulk_add_banned_artists(
    State(state): State<AppState>,
    Json(req): Json<BulkBannedRequest>,
) -> ApiResult<Json<BulkBannedResponse>> {
    let artists = req.artists.unwrap_or_default();
    if artists.is_empty() {
        return Err(Error::Validation("artists array is required".to_string()).into());
    }

    let outcome = db::banned_artists::bulk_add_banned_artists(&state.db, &artists).await?;

    let message = if outcome.skipped > 0 {
        format!(
            "Successfully added {} banned artist(s), skipped {} duplicate(s)",
            outcome.added, outcome.skipped
        )
    } else {
        format!("Successfully added {} banned artist(s)", outcome.added)
    };

    Ok(Json(BulkBannedResponse {
        message,
        count: outcome.added,
        skipped: outcome.skipped,
    }))
}
