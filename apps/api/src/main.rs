mod config;
mod errors;
mod facets;
mod gallery;
mod layout;
mod models;
mod ordering;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gallery::{FileGallerySource, GalleryStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gallery API v{}", env!("CARGO_PKG_VERSION"));

    // Load the gallery document; the service can't answer anything without it.
    let source = Arc::new(FileGallerySource::new(config.gallery_path.clone()));
    let gallery = GalleryStore::open(source).await?;

    info!(
        "Layout config: gap {} wide >= {} breakpoints {:?} max {} columns",
        config.layout.gap,
        config.layout.wide_aspect_threshold,
        config.layout.breakpoints,
        config.layout.max_columns
    );

    let state = AppState {
        gallery: Arc::new(gallery),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
