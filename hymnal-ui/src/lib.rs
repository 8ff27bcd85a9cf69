//! hymnal-ui library - worship-song catalog service
//!
//! REST/JSON API over the song catalog, the banned-artist registry, and
//! worship lineups. Registry and catalog mutations require the admin token;
//! reads and lineup endpoints are public.

use axum::Router;
use sqlx::SqlitePool;

pub mod api;
pub mod db;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Admin token from the settings table; blank disables auth
    pub admin_token: String,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, admin_token: String) -> Self {
        Self { db, admin_token }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post, put};
    use tower_http::trace::TraceLayer;

    // Admin routes (require the X-Admin-Token header)
    let admin = Router::new()
        .route("/api/songs", post(api::songs::create_song))
        .route("/api/songs/bulk", post(api::songs::bulk_import_songs))
        .route(
            "/api/songs/:id",
            put(api::songs::update_song).delete(api::songs::delete_song),
        )
        .route("/api/banned-artists", post(api::banned::create_banned_artist))
        .route("/api/banned-artists/bulk", post(api::banned::bulk_add_banned_artists))
        .route("/api/banned-artists/:id", delete(api::banned::delete_banned_artist))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/songs", get(api::songs::list_songs))
        .route("/api/songs/:id", get(api::songs::get_song))
        .route("/api/banned-artists", get(api::banned::list_banned_artists))
        .route(
            "/api/lineups",
            get(api::lineups::list_lineups).post(api::lineups::create_lineup),
        )
        .route(
            "/api/lineups/:id",
            get(api::lineups::get_lineup)
                .put(api::lineups::update_lineup)
                .delete(api::lineups::delete_lineup),
        )
        .merge(api::health_routes());

    // Combine routers
    Router::new()
        .merge(admin)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
