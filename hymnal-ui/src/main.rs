//! hymnal-ui - Worship-song catalog service
//!
//! Serves the catalog, banned-artist registry, and lineup REST API backed
//! by a SQLite database inside the resolved root folder.

use anyhow::Result;
use clap::Parser;
use hymnal_common::api::auth::load_admin_token;
use hymnal_common::config::{database_path, ensure_root_folder, resolve_root_folder};
use hymnal_common::db::init_database;
use hymnal_ui::{build_router, AppState};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "hymnal-ui", about = "Worship-song catalog service")]
struct Args {
    /// Root folder holding the database (overrides HYMNAL_ROOT and config file)
    #[arg(long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init, before any
    // database delays
    info!(
        "Starting Hymnal catalog service (hymnal-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = resolve_root_folder(args.root_folder.as_deref());
    ensure_root_folder(&root_folder)?;

    let db_path = database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let admin_token = load_admin_token(&pool).await?;
    if admin_token.is_empty() {
        info!("Admin authentication disabled (blank admin_token setting)");
    } else {
        info!("✓ Admin token loaded from settings");
    }

    let state = AppState::new(pool, admin_token);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:5720").await?;
    info!("hymnal-ui listening on http://127.0.0.1:5720");
    info!("Health check: http://127.0.0.1:5720/health");

    axum::serve(listener, app).await?;

    Ok(())
}
