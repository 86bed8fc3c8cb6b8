use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Aspect ratio used when a panel has no usable pixel dimensions (3:4 portrait).
pub const DEFAULT_ASPECT: f64 = 0.75;

/// A single CIELAB color, serialized as an `[L, a, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct LabColor {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl LabColor {
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Euclidean ΔE (CIE76) between two colors.
    pub fn delta_e(&self, other: &LabColor) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

impl From<[f64; 3]> for LabColor {
    fn from([l, a, b]: [f64; 3]) -> Self {
        Self { l, a, b }
    }
}

impl From<LabColor> for [f64; 3] {
    fn from(c: LabColor) -> Self {
        [c.l, c.a, c.b]
    }
}

/// One gallery item. Owned by the gallery snapshot; every component only borrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub issue: Option<u32>,
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posted_by: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub phash: Option<String>,
    #[serde(default)]
    pub ahash: Option<String>,
    #[serde(default)]
    pub dhash: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dominant_colors: Vec<LabColor>,
    #[serde(default)]
    pub colorfulness: Option<f64>,
}

impl Panel {
    /// `floor(year / 10) * 10` followed by `s`, e.g. `1987` → `"1980s"`.
    pub fn decade_label(&self) -> String {
        format!("{}s", self.year.div_euclid(10) * 10)
    }

    /// width / height, or the 3:4 default when either side is missing or zero.
    pub fn aspect(&self) -> f64 {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => w as f64 / h as f64,
            _ => DEFAULT_ASPECT,
        }
    }

    pub fn dominant_color(&self) -> Option<&LabColor> {
        self.dominant_colors.first()
    }

    pub fn colorfulness(&self) -> f64 {
        self.colorfulness.unwrap_or(0.0)
    }
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Envelope of the gallery document: `{ "panels": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryDocument {
    #[serde(default)]
    pub panels: Vec<Panel>,
}

#[cfg(test)]
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use super::Panel;

    /// Minimal panel: `added_at` is `minutes` past a fixed epoch so ordering tests stay readable.
    pub fn make_panel(id: &str, year: i32, minutes: i64) -> Panel {
        Panel {
            id: id.to_string(),
            title: format!("Panel {id}"),
            slug: id.to_string(),
            issue: Some(1),
            year,
            artist: String::new(),
            notes: None,
            tags: vec![],
            posted_by: String::new(),
            added_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::minutes(minutes),
            image: format!("images/{id}.jpg"),
            width: None,
            height: None,
            phash: None,
            ahash: None,
            dhash: None,
            dominant_colors: vec![],
            colorfulness: None,
        }
    }
}
