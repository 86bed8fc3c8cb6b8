//! Column geometry: responsive breakpoints, column width, pinned-control offsets.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Use `columns` columns while the available width is at most `max_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRule {
    pub max_width: f64,
    pub columns: usize,
}

/// Masonry parameters shared by every layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Gap between columns and between stacked items, in layout units.
    pub gap: f64,
    /// Panels at or above this aspect ratio span two columns.
    pub wide_aspect_threshold: f64,
    /// Checked in order; the first rule whose `max_width` admits the width wins.
    pub breakpoints: Vec<ColumnRule>,
    /// Column count when no breakpoint matches.
    pub max_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 12.0,
            wide_aspect_threshold: 1.2,
            breakpoints: vec![ColumnRule {
                max_width: 620.0,
                columns: 2,
            }],
            max_columns: 3,
        }
    }
}

impl LayoutConfig {
    /// Column count for the given available width.
    pub fn column_count(&self, available_width: f64) -> usize {
        self.breakpoints
            .iter()
            .find(|rule| available_width <= rule.max_width)
            .map(|rule| rule.columns)
            .unwrap_or(self.max_columns)
    }

    /// `(W − gap × (n − 1)) / n`, or `None` when the geometry is not usable.
    pub fn column_width(&self, container_width: f64, column_count: usize) -> Option<f64> {
        if column_count == 0 || !container_width.is_finite() || container_width <= 0.0 {
            return None;
        }
        let n = column_count as f64;
        let width = (container_width - self.gap * (n - 1.0)) / n;
        (width > 0.0).then_some(width)
    }
}

/// Starting column heights: the filter control sits atop column 0, the sort control
/// atop the last column. With a single column both stack into it.
pub fn control_offsets(column_count: usize, filter_height: f64, sort_height: f64) -> Vec<f64> {
    let mut heights = vec![0.0; column_count];
    if let Some(first) = heights.first_mut() {
        *first += filter_height.max(0.0);
    }
    if let Some(last) = heights.last_mut() {
        *last += sort_height.max(0.0);
    }
    heights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_breakpoints() {
        let config = LayoutConfig::default();
        assert_eq!(config.column_count(375.0), 2);
        assert_eq!(config.column_count(620.0), 2);
        assert_eq!(config.column_count(620.5), 3);
        assert_eq!(config.column_count(1440.0), 3);
    }

    #[test]
    fn test_ordered_rules_first_match_wins() {
        let config = LayoutConfig {
            breakpoints: vec![
                ColumnRule {
                    max_width: 400.0,
                    columns: 1,
                },
                ColumnRule {
                    max_width: 900.0,
                    columns: 2,
                },
                ColumnRule {
                    max_width: 1400.0,
                    columns: 3,
                },
            ],
            max_columns: 4,
            ..Default::default()
        };
        assert_eq!(config.column_count(320.0), 1);
        assert_eq!(config.column_count(800.0), 2);
        assert_eq!(config.column_count(1200.0), 3);
        assert_eq!(config.column_count(2000.0), 4);
    }

    #[test]
    fn test_column_width() {
        let config = LayoutConfig {
            gap: 10.0,
            ..Default::default()
        };
        assert_eq!(config.column_width(320.0, 3), Some(100.0));
        assert_eq!(config.column_width(0.0, 3), None);
        assert_eq!(config.column_width(320.0, 0), None);
        assert_eq!(config.column_width(f64::NAN, 2), None);
        assert_eq!(config.column_width(15.0, 3), None);
    }

    #[test]
    fn test_control_offsets() {
        assert_eq!(control_offsets(3, 40.0, 30.0), vec![40.0, 0.0, 30.0]);
        assert_eq!(control_offsets(1, 40.0, 30.0), vec![70.0]);
        assert!(control_offsets(0, 40.0, 30.0).is_empty());
    }
}
