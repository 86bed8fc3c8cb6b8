use std::sync::Arc;

use crate::config::Config;
use crate::gallery::GalleryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Current gallery snapshot plus the source it reloads from.
    pub gallery: Arc<GalleryStore>,
    pub config: Config,
}
