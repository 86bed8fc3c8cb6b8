use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Panel;
use crate::ordering::color::color_spectrum;
use crate::ordering::similarity::{similarity_walk, HashField};

/// Closed set of orderings offered by the sort control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    Phash,
    Ahash,
    Dhash,
    Color,
    /// Anything we don't recognize. Leaves the incoming order untouched.
    #[serde(other)]
    Unsorted,
}

impl SortMode {
    /// Case-insensitive parse; unknown names map to [`SortMode::Unsorted`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "newest" => SortMode::Newest,
            "oldest" => SortMode::Oldest,
            "phash" => SortMode::Phash,
            "ahash" => SortMode::Ahash,
            "dhash" => SortMode::Dhash,
            "color" => SortMode::Color,
            _ => SortMode::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::Phash => "phash",
            SortMode::Ahash => "ahash",
            SortMode::Dhash => "dhash",
            SortMode::Color => "color",
            SortMode::Unsorted => "unsorted",
        }
    }
}

/// Reorders `panels` under `mode`. Always a permutation of the input.
pub fn sort_panels(mut panels: Vec<&Panel>, mode: SortMode) -> Vec<&Panel> {
    debug!(mode = mode.as_str(), count = panels.len(), "Sorting panels");

    match mode {
        SortMode::Newest => {
            panels.sort_by(|a, b| b.added_at.cmp(&a.added_at));
            panels
        }
        SortMode::Oldest => {
            panels.sort_by_key(|p| p.added_at);
            panels
        }
        SortMode::Phash => similarity_walk(panels, HashField::Phash),
        SortMode::Ahash => similarity_walk(panels, HashField::Ahash),
        SortMode::Dhash => similarity_walk(panels, HashField::Dhash),
        SortMode::Color => color_spectrum(panels),
        SortMode::Unsorted => panels,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::panel::fixtures::make_panel;
    use crate::models::LabColor;

    const ALL_MODES: [SortMode; 7] = [
        SortMode::Newest,
        SortMode::Oldest,
        SortMode::Phash,
        SortMode::Ahash,
        SortMode::Dhash,
        SortMode::Color,
        SortMode::Unsorted,
    ];

    fn mixed_panels() -> Vec<Panel> {
        (0..9)
            .map(|i| {
                let mut p = make_panel(&format!("p{i}"), 1980 + i as i32, (i * 37 % 11) as i64);
                if i % 2 == 0 {
                    p.phash = Some(format!("{:04x}", i * 4099));
                }
                if i % 3 != 0 {
                    p.ahash = Some(format!("{:x}", i * 7));
                }
                p.dhash = Some("f".repeat(i));
                if i % 4 != 1 {
                    p.dominant_colors = vec![LabColor::new(10.0 * i as f64, i as f64 - 4.0, 3.0)];
                }
                p.colorfulness = Some(i as f64 * 1.5);
                p
            })
            .collect()
    }

    fn multiset(panels: &[&Panel]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for p in panels {
            *counts.entry(p.id.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_every_mode_is_a_permutation() {
        let panels = mixed_panels();
        let input: Vec<&Panel> = panels.iter().collect();
        for mode in ALL_MODES {
            let out = sort_panels(input.clone(), mode);
            assert_eq!(out.len(), input.len(), "{mode:?}");
            assert_eq!(multiset(&out), multiset(&input), "{mode:?}");
        }
    }

    #[test]
    fn test_newest_is_reverse_of_oldest() {
        let panels: Vec<Panel> = [4, 1, 3, 0, 2]
            .iter()
            .map(|m| make_panel(&format!("m{m}"), 1990, *m))
            .collect();
        let input: Vec<&Panel> = panels.iter().collect();
        let newest: Vec<&str> = sort_panels(input.clone(), SortMode::Newest)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        let mut oldest: Vec<&str> = sort_panels(input, SortMode::Oldest)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(oldest, vec!["m0", "m1", "m2", "m3", "m4"]);
        oldest.reverse();
        assert_eq!(newest, oldest);
    }

    #[test]
    fn test_unsorted_keeps_incoming_order() {
        let panels = mixed_panels();
        let input: Vec<&Panel> = panels.iter().rev().collect();
        let out = sort_panels(input.clone(), SortMode::Unsorted);
        assert!(out.iter().zip(&input).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_parse() {
        assert_eq!(SortMode::parse("PHASH"), SortMode::Phash);
        assert_eq!(SortMode::parse(" color "), SortMode::Color);
        assert_eq!(SortMode::parse("random"), SortMode::Unsorted);
        assert_eq!(SortMode::default(), SortMode::Newest);
    }

    #[test]
    fn test_serde_unknown_falls_back() {
        let mode: SortMode = serde_json::from_str("\"shuffle\"").unwrap();
        assert_eq!(mode, SortMode::Unsorted);
        let mode: SortMode = serde_json::from_str("\"dhash\"").unwrap();
        assert_eq!(mode, SortMode::Dhash);
    }

    #[test]
    fn test_empty_input() {
        for mode in ALL_MODES {
            assert!(sort_panels(vec![], mode).is_empty());
        }
    }
}
