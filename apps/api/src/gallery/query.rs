//! Query-string marshaling for the gallery endpoints.
//!
//! Filters arrive as comma-separated label lists (`?tag=rain,noir&decade=1980s`); the
//! sort arrives by name. Unknown sort names fall back to the incoming order.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::errors::AppError;
use crate::facets::Filters;
use crate::ordering::{HashField, SortMode};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryQuery {
    pub decade: Option<String>,
    pub tag: Option<String>,
    pub artist: Option<String>,
    pub posted_by: Option<String>,
    pub sort: Option<String>,
    /// Container width for `/layout`; absent or 0 means the viewport isn't measured yet.
    pub width: Option<f64>,
    pub filter_height: Option<f64>,
    pub sort_height: Option<f64>,
}

impl GalleryQuery {
    pub fn filters(&self) -> Filters {
        Filters {
            decade: split_labels(self.decade.as_deref()),
            tag: split_labels(self.tag.as_deref()),
            artist: split_labels(self.artist.as_deref()),
            posted_by: split_labels(self.posted_by.as_deref()),
        }
    }

    /// `newest` when no sort was requested.
    pub fn sort_mode(&self) -> SortMode {
        self.sort
            .as_deref()
            .map(SortMode::parse)
            .unwrap_or_default()
    }
}

fn split_labels(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// What the similar-panel lookup compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityMetric {
    Hash(HashField),
    Palette,
}

pub const DEFAULT_SIMILAR_LIMIT: usize = 8;
pub const MAX_SIMILAR_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct SimilarQuery {
    pub by: Option<String>,
    pub limit: Option<usize>,
}

impl SimilarQuery {
    pub fn metric(&self) -> Result<SimilarityMetric, AppError> {
        match self.by.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("phash") => Ok(SimilarityMetric::Hash(HashField::Phash)),
            Some("ahash") => Ok(SimilarityMetric::Hash(HashField::Ahash)),
            Some("dhash") => Ok(SimilarityMetric::Hash(HashField::Dhash)),
            Some("palette") => Ok(SimilarityMetric::Palette),
            Some(other) => Err(AppError::Validation(format!(
                "unknown similarity metric '{other}' (expected phash, ahash, dhash or palette)"
            ))),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SIMILAR_LIMIT)
            .clamp(1, MAX_SIMILAR_LIMIT)
    }
}
