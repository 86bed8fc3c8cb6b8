//! Cross-dimensional facet counts.
//!
//! A panel contributes to dimension D's table iff it satisfies every *other* active
//! dimension. Refining D therefore never collapses D's own counts, while every other
//! table answers "how many results if I also pick this".

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::facets::filter::{matches_dimension, Dimension, Filters};
use crate::models::Panel;

/// Label → count table per dimension. Unordered; see [`FacetCounts::options`] for display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCounts {
    pub decade: HashMap<String, usize>,
    pub tag: HashMap<String, usize>,
    pub artist: HashMap<String, usize>,
    pub posted_by: HashMap<String, usize>,
}

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

/// All four option lists, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
    pub decade: Vec<FacetOption>,
    pub tag: Vec<FacetOption>,
    pub artist: Vec<FacetOption>,
    pub posted_by: Vec<FacetOption>,
}

impl FacetCounts {
    pub fn table(&self, dimension: Dimension) -> &HashMap<String, usize> {
        match dimension {
            Dimension::Decade => &self.decade,
            Dimension::Tag => &self.tag,
            Dimension::Artist => &self.artist,
            Dimension::PostedBy => &self.posted_by,
        }
    }

    fn table_mut(&mut self, dimension: Dimension) -> &mut HashMap<String, usize> {
        match dimension {
            Dimension::Decade => &mut self.decade,
            Dimension::Tag => &mut self.tag,
            Dimension::Artist => &mut self.artist,
            Dimension::PostedBy => &mut self.posted_by,
        }
    }

    /// Display-ordered options: decades newest first, everything else ascending by label.
    /// Selected labels with no count are kept (count 0) so they stay deselectable.
    pub fn options(&self, dimension: Dimension, filters: &Filters) -> Vec<FacetOption> {
        let table = self.table(dimension);
        let selected = filters.selected(dimension);

        let mut labels: BTreeSet<&str> = table.keys().map(String::as_str).collect();
        labels.extend(selected.iter().map(String::as_str));

        let mut options: Vec<FacetOption> = labels
            .into_iter()
            .map(|label| FacetOption {
                label: label.to_string(),
                count: table.get(label).copied().unwrap_or(0),
                selected: selected.contains(label),
            })
            .collect();

        if dimension == Dimension::Decade {
            options.sort_by(|a, b| decade_start(&b.label).cmp(&decade_start(&a.label)));
        }
        options
    }

    pub fn all_options(&self, filters: &Filters) -> FacetOptions {
        FacetOptions {
            decade: self.options(Dimension::Decade, filters),
            tag: self.options(Dimension::Tag, filters),
            artist: self.options(Dimension::Artist, filters),
            posted_by: self.options(Dimension::PostedBy, filters),
        }
    }
}

/// Numeric start of a `"1980s"` label; unparseable labels sort after every decade.
fn decade_start(label: &str) -> i64 {
    label
        .strip_suffix('s')
        .and_then(|year| year.parse().ok())
        .unwrap_or(i64::MIN)
}

/// Counts every label of every dimension over the unfiltered `panels`.
pub fn compute_facets(panels: &[Panel], filters: &Filters) -> FacetCounts {
    let mut counts = FacetCounts::default();

    for panel in panels {
        let passes: [bool; 4] = Dimension::ALL.map(|d| matches_dimension(panel, filters, d));

        for (i, dimension) in Dimension::ALL.iter().enumerate() {
            let passes_others = passes
                .iter()
                .enumerate()
                .all(|(j, ok)| j == i || *ok);
            if !passes_others {
                continue;
            }

            let table = counts.table_mut(*dimension);
            for label in panel_labels(panel, *dimension) {
                *table.entry(label).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// Distinct, non-empty labels a panel carries on one dimension.
fn panel_labels(panel: &Panel, dimension: Dimension) -> Vec<String> {
    match dimension {
        Dimension::Decade => vec![panel.decade_label()],
        Dimension::Tag => {
            let distinct: BTreeSet<&String> = panel.tags.iter().filter(|t| !t.is_empty()).collect();
            distinct.into_iter().cloned().collect()
        }
        Dimension::Artist if !panel.artist.is_empty() => vec![panel.artist.clone()],
        Dimension::PostedBy if !panel.posted_by.is_empty() => vec![panel.posted_by.clone()],
        _ => vec![],
    }
}
