//! Worship lineup endpoints
//!
//! Lineups are public: composing a setlist is congregation-facing, while
//! catalog and registry mutations stay behind the admin gate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use hymnal_common::db::models::LineupWithSongs;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::ApiResult;
use crate::db::lineups::LineupInput;
use crate::{db, AppState};

/// Fields for a lineup create or replace request
#[derive(Debug, Deserialize)]
pub struct LineupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub song_ids: Option<Vec<Uuid>>,
}

impl LineupRequest {
    fn into_input(self) -> LineupInput {
        LineupInput {
            name: self.name.unwrap_or_default(),
            description: self.description,
            date: self.date,
            song_ids: self.song_ids.unwrap_or_default(),
        }
    }
}

/// GET /api/lineups
pub async fn list_lineups(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<LineupWithSongs>>> {
    let lineups = db::lineups::list_lineups(&state.db).await?;
    Ok(Json(lineups))
}

/// POST /api/lineups
pub async fn create_lineup(
    State(state): State<AppState>,
    Json(req): Json<LineupRequest>,
) -> ApiResult<(StatusCode, Json<LineupWithSongs>)> {
    let lineup = db::lineups::create_lineup(&state.db, &req.into_input()).await?;
    Ok((StatusCode::CREATED, Json(lineup)))
}

/// GET /api/lineups/:id
pub async fn get_lineup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<LineupWithSongs>> {
    let lineup = db::lineups::get_lineup(&state.db, id).await?;
    Ok(Json(lineup))
}

/// PUT /api/lineups/:id
///
/// Replaces the lineup's fields and its entire ordered song set. Reordering
/// is expressed by resubmitting the full id list in the new order.
pub async fn update_lineup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LineupRequest>,
) -> ApiResult<Json<LineupWithSongs>> {
    let lineup = db::lineups::replace_lineup(&state.db, id, &req.into_input()).await?;
    Ok(Json(lineup))
}

/// DELETE /api/lineups/:id
pub async fn delete_lineup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    db::lineups::delete_lineup(&state.db, id).await?;
    Ok(Json(json!({ "message": "Lineup deleted successfully" })))
}
