//! Filter selection and set membership.
//!
//! A panel passes when it satisfies every active dimension (AND across dimensions).
//! Inside the tag dimension one matching tag is enough (OR within the dimension).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Panel;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// The four filterable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Decade,
    Tag,
    Artist,
    PostedBy,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Decade,
        Dimension::Tag,
        Dimension::Artist,
        Dimension::PostedBy,
    ];
}

/// Selected labels per dimension. An empty set means "no restriction".
///
/// Replaced wholesale by the caller on every change, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(default)]
    pub decade: BTreeSet<String>,
    #[serde(default)]
    pub tag: BTreeSet<String>,
    #[serde(default)]
    pub artist: BTreeSet<String>,
    #[serde(default)]
    pub posted_by: BTreeSet<String>,
}

impl Filters {
    pub fn selected(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Decade => &self.decade,
            Dimension::Tag => &self.tag,
            Dimension::Artist => &self.artist,
            Dimension::PostedBy => &self.posted_by,
        }
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.selected(*d).is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Membership
// ────────────────────────────────────────────────────────────────────────────

/// Whether `panel` satisfies the filter on a single dimension.
/// An inactive (empty) dimension accepts everything.
pub fn matches_dimension(panel: &Panel, filters: &Filters, dimension: Dimension) -> bool {
    let selected = filters.selected(dimension);
    if selected.is_empty() {
        return true;
    }
    match dimension {
        Dimension::Decade => selected.contains(&panel.decade_label()),
        Dimension::Tag => panel.tags.iter().any(|t| selected.contains(t)),
        Dimension::Artist => selected.contains(&panel.artist),
        Dimension::PostedBy => selected.contains(&panel.posted_by),
    }
}

/// Whether `panel` satisfies every active dimension except `skip`.
pub fn matches_except(panel: &Panel, filters: &Filters, skip: Option<Dimension>) -> bool {
    Dimension::ALL
        .iter()
        .filter(|d| Some(**d) != skip)
        .all(|d| matches_dimension(panel, filters, *d))
}

/// Returns the panels passing every active dimension, in their incoming order.
pub fn apply_filters<'a>(panels: &'a [Panel], filters: &Filters) -> Vec<&'a Panel> {
    if filters.is_empty() {
        return panels.iter().collect();
    }
    panels
        .iter()
        .filter(|p| matches_except(p, filters, None))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
