//! The full presentation pipeline: filter → order → pack, plus facets over the
//! unfiltered gallery.

use serde::Serialize;
use tracing::debug;

use crate::facets::{apply_filters, compute_facets, FacetOptions, Filters};
use crate::layout::{compute_layout, control_offsets, LayoutConfig, MasonryLayout};
use crate::models::Panel;
use crate::ordering::{sort_panels, SortMode};

/// Measurements supplied by the rendering layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub width: f64,
    pub filter_height: f64,
    pub sort_height: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView<'a> {
    pub ready: bool,
    pub sort: SortMode,
    pub total: usize,
    pub matched: usize,
    pub facets: FacetOptions,
    /// Filtered panels in display order.
    pub order: Vec<&'a str>,
    #[serde(flatten)]
    pub layout: MasonryLayout<'a>,
}

/// Filtered panels in the requested order.
pub fn ordered_panels<'a>(panels: &'a [Panel], filters: &Filters, sort: SortMode) -> Vec<&'a Panel> {
    sort_panels(apply_filters(panels, filters), sort)
}

/// Runs the whole pipeline for one viewport. A zero-width viewport yields `ready: false`
/// and no placements, but facets and order are still computed.
pub fn build_view<'a>(
    panels: &'a [Panel],
    filters: &Filters,
    sort: SortMode,
    viewport: Viewport,
    config: &LayoutConfig,
) -> GalleryView<'a> {
    let facets = compute_facets(panels, filters).all_options(filters);
    let ordered = ordered_panels(panels, filters, sort);

    let columns = config.column_count(viewport.width);
    let offsets = control_offsets(columns, viewport.filter_height, viewport.sort_height);
    let layout = compute_layout(&ordered, columns, viewport.width, &offsets, config);

    debug!(
        total = panels.len(),
        matched = ordered.len(),
        sort = sort.as_str(),
        ready = layout.is_ready(),
        "Gallery view built"
    );

    GalleryView {
        ready: layout.is_ready(),
        sort,
        total: panels.len(),
        matched: ordered.len(),
        facets,
        order: ordered.iter().map(|p| p.id.as_str()).collect(),
        layout,
    }
}
