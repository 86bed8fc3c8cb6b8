//! Nearest panels to a given panel, by perceptual hash or by palette.

use serde::Serialize;

use crate::gallery::query::SimilarityMetric;
use crate::models::Panel;
use crate::ordering::{hamming_distance, palette_distance};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPanel<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub distance: f64,
}

fn distance(target: &Panel, other: &Panel, metric: SimilarityMetric) -> Option<f64> {
    match metric {
        SimilarityMetric::Hash(field) => {
            let a = field.value(target)?;
            let b = field.value(other)?;
            Some(hamming_distance(a, b) as f64)
        }
        SimilarityMetric::Palette => {
            palette_distance(&target.dominant_colors, &other.dominant_colors)
        }
    }
}

/// Up to `limit` panels closest to `target`, nearest first (gallery order on ties).
/// Panels missing the compared field are skipped; the target itself is never returned.
pub fn find_similar<'a>(
    panels: &'a [Panel],
    target: &Panel,
    metric: SimilarityMetric,
    limit: usize,
) -> Vec<SimilarPanel<'a>> {
    let mut scored: Vec<SimilarPanel<'a>> = panels
        .iter()
        .filter(|p| p.id != target.id)
        .filter_map(|p| {
            distance(target, p, metric).map(|d| SimilarPanel {
                id: &p.id,
                title: &p.title,
                distance: d,
            })
        })
        .collect();

    scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::panel::fixtures::make_panel;
    use crate::models::LabColor;
    use crate::ordering::HashField;

    fn with_hash(id: &str, phash: Option<&str>) -> Panel {
        let mut p = make_panel(id, 1990, 0);
        p.phash = phash.map(String::from);
        p
    }

    #[test]
    fn test_hash_neighbors_sorted_and_limited() {
        let panels = vec![
            with_hash("t", Some("00")),
            with_hash("far", Some("ff")),
            with_hash("near", Some("01")),
            with_hash("none", None),
            with_hash("mid", Some("07")),
        ];
        let out = find_similar(&panels, &panels[0], SimilarityMetric::Hash(HashField::Phash), 2);
        let ids: Vec<&str> = out.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["near", "mid"]);
        assert_eq!(out[0].distance, 1.0);
    }

    #[test]
    fn test_target_without_field_has_no_neighbors() {
        let panels = vec![with_hash("t", None), with_hash("a", Some("00"))];
        let out = find_similar(&panels, &panels[0], SimilarityMetric::Hash(HashField::Phash), 5);
        assert!(out.is_empty());
    }

    #[test]
    fn test_palette_neighbors() {
        let mut t = make_panel("t", 1990, 0);
        t.dominant_colors = vec![LabColor::new(50.0, 60.0, 0.0)];
        let mut red = make_panel("red", 1990, 1);
        red.dominant_colors = vec![LabColor::new(52.0, 58.0, 2.0)];
        let mut blue = make_panel("blue", 1990, 2);
        blue.dominant_colors = vec![LabColor::new(30.0, 20.0, -60.0)];
        let plain = make_panel("plain", 1990, 3);

        let panels = vec![t, blue, plain, red];
        let out = find_similar(&panels, &panels[0], SimilarityMetric::Palette, 10);
        let ids: Vec<&str> = out.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["red", "blue"]);
    }
}
