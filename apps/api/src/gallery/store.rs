use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::gallery::source::GallerySource;
use crate::models::Panel;

/// Immutable view of the gallery served to requests.
///
/// A reload builds a new snapshot and swaps the `Arc`; in-flight requests keep the old one.
#[derive(Debug)]
pub struct GallerySnapshot {
    pub panels: Vec<Panel>,
    /// Starts at 1 and increments on every successful reload.
    pub revision: u64,
    pub loaded_at: DateTime<Utc>,
}

impl GallerySnapshot {
    pub fn find(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}

pub struct GalleryStore {
    source: Arc<dyn GallerySource>,
    current: RwLock<Arc<GallerySnapshot>>,
}

impl GalleryStore {
    /// Loads the first snapshot. Fails if the source can't be read.
    pub async fn open(source: Arc<dyn GallerySource>) -> anyhow::Result<Self> {
        let document = source.load().await?;
        info!(
            source = %source.describe(),
            panels = document.panels.len(),
            "Gallery loaded"
        );

        let snapshot = GallerySnapshot {
            panels: document.panels,
            revision: 1,
            loaded_at: Utc::now(),
        };

        Ok(Self {
            source,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub async fn snapshot(&self) -> Arc<GallerySnapshot> {
        self.current.read().await.clone()
    }

    /// Re-reads the source and swaps the snapshot wholesale.
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self) -> Result<Arc<GallerySnapshot>, AppError> {
        let document = self
            .source
            .load()
            .await
            .map_err(|e| AppError::Source(format!("{e:#}")))?;

        let mut current = self.current.write().await;
        let snapshot = Arc::new(GallerySnapshot {
            panels: document.panels,
            revision: current.revision + 1,
            loaded_at: Utc::now(),
        });
        *current = snapshot.clone();

        info!(
            revision = snapshot.revision,
            panels = snapshot.panels.len(),
            "Gallery reloaded"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
pub mod test_support {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use crate::gallery::source::GallerySource;
    use crate::models::{GalleryDocument, Panel};

    /// In-memory source whose contents tests can swap between loads.
    pub struct StaticSource {
        pub panels: Mutex<Option<Vec<Panel>>>,
    }

    impl StaticSource {
        pub fn new(panels: Vec<Panel>) -> Self {
            Self {
                panels: Mutex::new(Some(panels)),
            }
        }
    }

    #[async_trait]
    impl GallerySource for StaticSource {
        async fn load(&self) -> anyhow::Result<GalleryDocument> {
            let panels = self.panels.lock().unwrap().clone();
            panels
                .map(|panels| GalleryDocument { panels })
                .ok_or_else(|| anyhow!("source unavailable"))
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }
}
