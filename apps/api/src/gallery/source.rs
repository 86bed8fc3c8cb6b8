//! Gallery sources: where the `{ "panels": [...] }` document comes from.
//!
//! The service only ever reads the document. The ingestion pipeline that writes it
//! lives elsewhere.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::GalleryDocument;

/// Pluggable loader for the gallery document.
///
/// Carried in `GalleryStore` as `Arc<dyn GallerySource>`.
#[async_trait]
pub trait GallerySource: Send + Sync {
    async fn load(&self) -> Result<GalleryDocument>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Reads the gallery document from a JSON file on disk.
pub struct FileGallerySource {
    pub path: PathBuf,
}

impl FileGallerySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GallerySource for FileGallerySource {
    async fn load(&self) -> Result<GalleryDocument> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read gallery file {}", self.path.display()))?;

        let document: GalleryDocument = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse gallery file {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            panels = document.panels.len(),
            "Gallery document read"
        );
        Ok(dedupe_panels(document))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Drops later panels that reuse an earlier panel's id; identity must be unique.
pub fn dedupe_panels(mut document: GalleryDocument) -> GalleryDocument {
    let mut seen = HashSet::new();
    let before = document.panels.len();
    document.panels.retain(|p| seen.insert(p.id.clone()));

    let dropped = before - document.panels.len();
    if dropped > 0 {
        warn!(dropped, "Gallery document contains duplicate panel ids; kept first occurrence");
    }
    document
}
