//! Axum route handlers for the Gallery API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::facets::{compute_facets, FacetOptions};
use crate::gallery::metadata::{compute_metadata_report, MetadataReport};
use crate::gallery::query::{GalleryQuery, SimilarQuery};
use crate::gallery::similar::find_similar;
use crate::gallery::view::{build_view, ordered_panels, Viewport};
use crate::models::Panel;
use crate::ordering::SortMode;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PanelListResponse {
    pub total: usize,
    pub matched: usize,
    pub sort: SortMode,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub revision: u64,
    pub panels: usize,
    pub loaded_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/panels
pub async fn handle_list_panels(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<PanelListResponse>, AppError> {
    let snapshot = state.gallery.snapshot().await;
    let sort = query.sort_mode();
    let panels: Vec<Panel> = ordered_panels(&snapshot.panels, &query.filters(), sort)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(PanelListResponse {
        total: snapshot.panels.len(),
        matched: panels.len(),
        sort,
        panels,
    }))
}

/// GET /api/v1/panels/:id
pub async fn handle_get_panel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Panel>, AppError> {
    let snapshot = state.gallery.snapshot().await;
    snapshot
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Panel {id} not found")))
}

/// GET /api/v1/panels/:id/similar
pub async fn handle_similar_panels(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SimilarQuery>,
) -> Result<Json<Value>, AppError> {
    let metric = query.metric()?;
    let snapshot = state.gallery.snapshot().await;
    let target = snapshot
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("Panel {id} not found")))?;

    let similar = find_similar(&snapshot.panels, target, metric, query.limit());
    Ok(Json(serde_json::json!({
        "id": target.id,
        "similar": similar,
    })))
}

/// GET /api/v1/facets
pub async fn handle_facets(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<FacetOptions>, AppError> {
    let snapshot = state.gallery.snapshot().await;
    let filters = query.filters();
    Ok(Json(
        compute_facets(&snapshot.panels, &filters).all_options(&filters),
    ))
}

/// GET /api/v1/layout
///
/// Runs filter → order → pack for the caller's viewport. The pass is CPU-bound, so it
/// runs on the blocking pool.
pub async fn handle_layout(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.gallery.snapshot().await;
    let config = state.config.layout.clone();
    let filters = query.filters();
    let sort = query.sort_mode();
    let viewport = Viewport {
        width: query.width.unwrap_or(0.0),
        filter_height: query.filter_height.unwrap_or(0.0),
        sort_height: query.sort_height.unwrap_or(0.0),
    };

    let body = tokio::task::spawn_blocking(move || {
        let view = build_view(&snapshot.panels, &filters, sort, viewport, &config);
        serde_json::to_value(&view)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))?
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize layout: {e}")))?;

    Ok(Json(body))
}

/// GET /api/v1/gallery/metadata
pub async fn handle_metadata_report(
    State(state): State<AppState>,
) -> Result<Json<MetadataReport>, AppError> {
    let snapshot = state.gallery.snapshot().await;
    Ok(Json(compute_metadata_report(&snapshot.panels)))
}

/// POST /api/v1/gallery/reload
pub async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let snapshot = state.gallery.reload().await?;
    info!(revision = snapshot.revision, "Gallery reload requested via API");
    Ok(Json(ReloadResponse {
        revision: snapshot.revision,
        panels: snapshot.panels.len(),
        loaded_at: snapshot.loaded_at,
    }))
}
