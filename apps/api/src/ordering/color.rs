//! Color spectrum ordering and palette distance.
//!
//! The `color` sort walks the hue wheel: chromatic panels first, then near-grayscale ones,
//! each group ordered by the hue of its most dominant CIELAB color with lightness as the
//! tiebreak. Panels with no palette trail their group.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use crate::models::{LabColor, Panel};

/// Colorfulness at or above this value counts as chromatic.
pub const CHROMATIC_THRESHOLD: f64 = 5.0;

/// Hue is scaled by this factor so lightness only breaks ties between equal hues.
const HUE_SCALE: f64 = 1000.0;

pub fn is_chromatic(panel: &Panel) -> bool {
    panel.colorfulness() >= CHROMATIC_THRESHOLD
}

/// `atan2(b, a)` normalized into `[0, 2π)`.
pub fn hue_angle(color: &LabColor) -> f64 {
    let hue = color.b.atan2(color.a);
    if hue < 0.0 {
        hue + TAU
    } else {
        hue
    }
}

/// Composite sort key `hue * 1000 + L`; `+∞` when the panel has no dominant color.
pub fn spectrum_key(panel: &Panel) -> f64 {
    match panel.dominant_color() {
        Some(color) => {
            let key = hue_angle(color) * HUE_SCALE + color.l;
            if key.is_nan() {
                f64::INFINITY
            } else {
                key
            }
        }
        None => f64::INFINITY,
    }
}

fn compare_spectrum(a: &Panel, b: &Panel) -> Ordering {
    spectrum_key(a)
        .total_cmp(&spectrum_key(b))
        .then_with(|| a.added_at.cmp(&b.added_at))
}

/// Chromatic group first, then achromatic; each group sorted along the spectrum.
pub fn color_spectrum(panels: Vec<&Panel>) -> Vec<&Panel> {
    let (mut chromatic, mut achromatic): (Vec<&Panel>, Vec<&Panel>) =
        panels.into_iter().partition(|p| is_chromatic(p));

    chromatic.sort_by(|a, b| compare_spectrum(a, b));
    achromatic.sort_by(|a, b| compare_spectrum(a, b));

    chromatic.extend(achromatic);
    chromatic
}

/// Weighted multi-color distance between two palettes.
///
/// Each color is matched to its nearest counterpart in the other palette (ΔE), weighted
/// by `1 / (rank + 1)` so dominant colors matter most. Averaged over both directions to
/// stay symmetric. `None` if either palette is empty.
pub fn palette_distance(a: &[LabColor], b: &[LabColor]) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    Some((directed_distance(a, b) + directed_distance(b, a)) / 2.0)
}

fn directed_distance(from: &[LabColor], to: &[LabColor]) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for (rank, color) in from.iter().enumerate() {
        let weight = 1.0 / (rank as f64 + 1.0);
        let nearest = to
            .iter()
            .map(|other| color.delta_e(other))
            .fold(f64::INFINITY, f64::min);
        weighted += weight * nearest;
        total_weight += weight;
    }

    weighted / total_weight
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::models::panel::fixtures::make_panel;

    fn colored(id: &str, minutes: i64, colorfulness: f64, lab: Option<[f64; 3]>) -> Panel {
        let mut p = make_panel(id, 1990, minutes);
        p.colorfulness = Some(colorfulness);
        p.dominant_colors = lab.map(|c| vec![LabColor::from(c)]).unwrap_or_default();
        p
    }

    fn ids(panels: &[&Panel]) -> Vec<String> {
        panels.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_hue_angle_normalized() {
        assert_eq!(hue_angle(&LabColor::new(50.0, 60.0, 0.0)), 0.0);
        assert!((hue_angle(&LabColor::new(50.0, 0.0, 60.0)) - FRAC_PI_2).abs() < 1e-12);
        let negative = hue_angle(&LabColor::new(50.0, 0.0, -60.0));
        assert!((negative - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_ascending_hue() {
        let a = colored("a", 0, 20.0, Some([50.0, 60.0, 0.0]));
        let b = colored("b", 1, 20.0, Some([50.0, 0.0, 60.0]));
        assert_eq!(ids(&color_spectrum(vec![&b, &a])), vec!["a", "b"]);
    }

    #[test]
    fn test_chromatic_threshold_inclusive() {
        let exact = colored("exact", 0, 5.0, Some([50.0, 0.0, 60.0]));
        let below = colored("below", 1, 4.999, Some([50.0, 60.0, 0.0]));
        assert!(is_chromatic(&exact));
        assert!(!is_chromatic(&below));
        // chromatic group wins even though "below" has the smaller hue
        assert_eq!(ids(&color_spectrum(vec![&below, &exact])), vec!["exact", "below"]);
    }

    #[test]
    fn test_missing_colorfulness_is_achromatic() {
        let mut p = colored("p", 0, 0.0, Some([50.0, 60.0, 0.0]));
        p.colorfulness = None;
        assert!(!is_chromatic(&p));
    }

    #[test]
    fn test_no_palette_sorts_last_in_group_by_age() {
        let late = colored("late", 9, 20.0, None);
        let early = colored("early", 1, 20.0, None);
        let hued = colored("hued", 5, 20.0, Some([10.0, -5.0, -5.0]));
        let gray = colored("gray", 0, 1.0, Some([80.0, 0.5, 0.5]));
        let out = color_spectrum(vec![&late, &gray, &early, &hued]);
        assert_eq!(ids(&out), vec!["hued", "early", "late", "gray"]);
    }

    #[test]
    fn test_lightness_breaks_equal_hue() {
        let dark = colored("dark", 3, 20.0, Some([20.0, 30.0, 30.0]));
        let light = colored("light", 0, 20.0, Some([80.0, 30.0, 30.0]));
        assert_eq!(ids(&color_spectrum(vec![&light, &dark])), vec!["dark", "light"]);
    }

    #[test]
    fn test_equal_keys_fall_back_to_added_at() {
        let newer = colored("newer", 7, 20.0, Some([40.0, 10.0, 10.0]));
        let older = colored("older", 2, 20.0, Some([40.0, 10.0, 10.0]));
        assert_eq!(ids(&color_spectrum(vec![&newer, &older])), vec!["older", "newer"]);
    }

    #[test]
    fn test_palette_distance() {
        let red = [LabColor::new(50.0, 60.0, 0.0)];
        let also_red = [LabColor::new(50.0, 60.0, 0.0), LabColor::new(90.0, 0.0, 0.0)];
        let blue = [LabColor::new(30.0, 20.0, -60.0)];

        assert_eq!(palette_distance(&red, &[]), None);
        assert_eq!(palette_distance(&red, &red), Some(0.0));

        let near = palette_distance(&red, &also_red).unwrap();
        let far = palette_distance(&red, &blue).unwrap();
        assert!(near < far);
        assert_eq!(
            palette_distance(&red, &blue),
            palette_distance(&blue, &red)
        );
    }
}
