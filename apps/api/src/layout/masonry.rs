//! Masonry packer: absolute placement of the ordered panel sequence.
//!
//! # Placement rules
//! - Normal panels go to the shortest column (lowest index on ties).
//! - The lead panel is pinned to column 0 as long as column 0 is no more than one
//!   panel-height taller than the shortest column; past that it is placed like any other.
//! - Wide panels (aspect ≥ threshold, 2+ columns) span the adjacent pair with the lowest
//!   max height (leftmost on ties). The shorter column of the pair is squared off with a
//!   filler block first, so both columns end the pass at the same height.
//!
//! Every call is a full recomputation; nothing is cached between passes.

use serde::Serialize;
use tracing::debug;

use crate::layout::columns::LayoutConfig;
use crate::models::Panel;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A positioned block on the gallery canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlacedItem<'a> {
    Panel {
        id: &'a str,
        column: usize,
        /// 1 for normal panels, 2 for wide ones.
        span: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Decorative block squaring off a column before a spanning panel.
    Filler {
        column: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasonryLayout<'a> {
    pub items: Vec<PlacedItem<'a>>,
    #[serde(rename = "columns")]
    pub column_count: usize,
    pub column_width: f64,
    pub column_heights: Vec<f64>,
    /// Max final column height; sizes the scroll container.
    pub total_height: f64,
}

impl MasonryLayout<'_> {
    /// False when the geometry was unusable and nothing was placed.
    pub fn is_ready(&self) -> bool {
        self.column_count > 0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Packing
// ────────────────────────────────────────────────────────────────────────────

/// Packs `panels` (already filtered and ordered) into `column_count` columns.
///
/// `initial_heights[i]` is the height already occupied at the top of column `i` by pinned
/// controls; missing entries count as 0. A zero or non-finite `container_width`, or zero
/// columns, yields an empty layout with zero height.
pub fn compute_layout<'a>(
    panels: &[&'a Panel],
    column_count: usize,
    container_width: f64,
    initial_heights: &[f64],
    config: &LayoutConfig,
) -> MasonryLayout<'a> {
    let Some(column_width) = config.column_width(container_width, column_count) else {
        debug!(container_width, column_count, "Layout skipped: container not ready");
        return MasonryLayout::default();
    };

    let mut packer = Packer {
        config,
        column_width,
        heights: (0..column_count)
            .map(|i| {
                initial_heights
                    .get(i)
                    .copied()
                    .filter(|h| h.is_finite())
                    .unwrap_or(0.0)
                    .max(0.0)
            })
            .collect(),
        items: Vec::with_capacity(panels.len()),
    };

    for (index, panel) in panels.iter().copied().enumerate() {
        let aspect = panel.aspect();
        if column_count >= 2 && aspect >= config.wide_aspect_threshold {
            packer.place_wide(panel, aspect);
        } else {
            packer.place_normal(panel, aspect, index == 0);
        }
    }

    let total_height = packer.heights.iter().copied().fold(0.0, f64::max);

    debug!(
        panels = panels.len(),
        items = packer.items.len(),
        columns = column_count,
        total_height,
        "Masonry layout computed"
    );

    MasonryLayout {
        items: packer.items,
        column_count,
        column_width,
        column_heights: packer.heights,
        total_height,
    }
}

struct Packer<'c, 'a> {
    config: &'c LayoutConfig,
    column_width: f64,
    heights: Vec<f64>,
    items: Vec<PlacedItem<'a>>,
}

impl<'a> Packer<'_, 'a> {
    fn column_x(&self, column: usize) -> f64 {
        column as f64 * (self.column_width + self.config.gap)
    }

    fn shortest_column(&self) -> usize {
        let mut best = 0;
        for (i, h) in self.heights.iter().enumerate() {
            if *h < self.heights[best] {
                best = i;
            }
        }
        best
    }

    fn place_normal(&mut self, panel: &'a Panel, aspect: f64, is_lead: bool) {
        let height = self.column_width / aspect;
        let shortest = self.shortest_column();

        let column = if is_lead && self.heights[0] - self.heights[shortest] <= height {
            0
        } else {
            shortest
        };

        let y = self.heights[column];
        self.items.push(PlacedItem::Panel {
            id: &panel.id,
            column,
            span: 1,
            x: self.column_x(column),
            y,
            width: self.column_width,
            height,
        });
        self.heights[column] = y + height + self.config.gap;
    }

    fn place_wide(&mut self, panel: &'a Panel, aspect: f64) {
        let pair_top = |i: usize| self.heights[i].max(self.heights[i + 1]);

        let mut left = 0;
        for i in 1..self.heights.len() - 1 {
            if pair_top(i) < pair_top(left) {
                left = i;
            }
        }
        let right = left + 1;
        let y = pair_top(left);

        for column in [left, right] {
            let gap_height = y - self.heights[column];
            if gap_height > 0.0 {
                self.items.push(PlacedItem::Filler {
                    column,
                    x: self.column_x(column),
                    y: self.heights[column],
                    width: self.column_width,
                    height: gap_height,
                });
            }
        }

        let width = 2.0 * self.column_width + self.config.gap;
        let height = width / aspect;
        self.items.push(PlacedItem::Panel {
            id: &panel.id,
            column: left,
            span: 2,
            x: self.column_x(left),
            y,
            width,
            height,
        });

        let bottom = y + height + self.config.gap;
        self.heights[left] = bottom;
        self.heights[right] = bottom;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
