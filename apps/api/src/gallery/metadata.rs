//! Metadata completeness: which panels still lack the fields the external metadata
//! pass is responsible for (pixel dimensions and the three perceptual hashes).
//!
//! Panels without these fields still render (default aspect, sort last), but the
//! similarity and masonry results are only as good as this metadata.

use serde::{Deserialize, Serialize};

use crate::models::Panel;

/// Fields the metadata pass fills in, in report order.
pub const METADATA_FIELDS: [&str; 5] = ["width", "height", "phash", "ahash", "dhash"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompletePanel {
    pub id: String,
    pub image: String,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCoverage {
    pub field: String,
    pub missing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataReport {
    pub total_panels: usize,
    pub complete_panels: usize,
    /// Share of panels with every metadata field present; 1.0 for an empty gallery.
    pub coverage: f64,
    pub fields: Vec<FieldCoverage>,
    pub incomplete: Vec<IncompletePanel>,
    /// Panels without a dominant-color palette (sort last under `color`).
    pub missing_palette: usize,
}

/// Names of the metadata fields `panel` is missing. Zero dimensions count as missing.
pub fn missing_fields(panel: &Panel) -> Vec<&'static str> {
    let present = |field: &str| match field {
        "width" => panel.width.is_some_and(|w| w > 0),
        "height" => panel.height.is_some_and(|h| h > 0),
        "phash" => panel.phash.as_deref().is_some_and(|h| !h.is_empty()),
        "ahash" => panel.ahash.as_deref().is_some_and(|h| !h.is_empty()),
        "dhash" => panel.dhash.as_deref().is_some_and(|h| !h.is_empty()),
        _ => true,
    };
    METADATA_FIELDS
        .into_iter()
        .filter(|field| !present(*field))
        .collect()
}

pub fn compute_metadata_report(panels: &[Panel]) -> MetadataReport {
    let mut field_missing = [0usize; METADATA_FIELDS.len()];
    let mut incomplete = Vec::new();

    for panel in panels {
        let missing = missing_fields(panel);
        if missing.is_empty() {
            continue;
        }
        for field in &missing {
            if let Some(i) = METADATA_FIELDS.iter().position(|f| f == field) {
                field_missing[i] += 1;
            }
        }
        incomplete.push(IncompletePanel {
            id: panel.id.clone(),
            image: panel.image.clone(),
            missing: missing.into_iter().map(String::from).collect(),
        });
    }

    let total_panels = panels.len();
    let complete_panels = total_panels - incomplete.len();
    let coverage = if total_panels == 0 {
        1.0
    } else {
        complete_panels as f64 / total_panels as f64
    };

    MetadataReport {
        total_panels,
        complete_panels,
        coverage,
        fields: METADATA_FIELDS
            .iter()
            .zip(field_missing)
            .map(|(field, missing)| FieldCoverage {
                field: field.to_string(),
                missing,
            })
            .collect(),
        incomplete,
        missing_palette: panels.iter().filter(|p| p.dominant_colors.is_empty()).count(),
    }
}
