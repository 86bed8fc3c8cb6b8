//! Perceptual-hash similarity walk.
//!
//! Greedy nearest-neighbor tour over the panels that carry the selected hash: start from
//! the first hashed panel in incoming order, then keep stepping to the closest unvisited
//! panel by Hamming distance. Approximates a visual-similarity path; it is not an optimal tour.

use serde::{Deserialize, Serialize};

use crate::models::Panel;

/// Which precomputed perceptual hash to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashField {
    Phash,
    Ahash,
    Dhash,
}

impl HashField {
    /// The panel's hash for this field, or `None` when absent or empty.
    pub fn value<'a>(&self, panel: &'a Panel) -> Option<&'a str> {
        let raw = match self {
            HashField::Phash => panel.phash.as_deref(),
            HashField::Ahash => panel.ahash.as_deref(),
            HashField::Dhash => panel.dhash.as_deref(),
        };
        raw.filter(|h| !h.is_empty())
    }
}

/// Bitwise Hamming distance between two hex strings.
///
/// Compared nibble by nibble over the longer string's length; a missing trailing digit
/// counts as `0`, and so does any character that is not a hex digit.
pub fn hamming_distance(a: &str, b: &str) -> u32 {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let len = a.len().max(b.len());

    (0..len)
        .map(|i| (nibble(a.get(i)) ^ nibble(b.get(i))).count_ones())
        .sum()
}

fn nibble(byte: Option<&u8>) -> u32 {
    byte.and_then(|b| (*b as char).to_digit(16)).unwrap_or(0)
}

/// Orders `panels` as a nearest-neighbor walk over `field`.
///
/// Panels lacking the hash are appended after the walk, oldest first.
pub fn similarity_walk<'a>(panels: Vec<&'a Panel>, field: HashField) -> Vec<&'a Panel> {
    let (hashed, mut unhashed): (Vec<&Panel>, Vec<&Panel>) =
        panels.into_iter().partition(|p| field.value(p).is_some());
    unhashed.sort_by_key(|p| p.added_at);

    let mut result = Vec::with_capacity(hashed.len() + unhashed.len());

    if hashed.len() < 2 {
        result.extend(hashed);
        result.extend(unhashed);
        return result;
    }

    let hashes: Vec<&str> = hashed
        .iter()
        .map(|p| field.value(p).unwrap_or_default())
        .collect();
    let mut visited = vec![false; hashed.len()];
    let mut current = 0usize;
    visited[0] = true;
    result.push(hashed[0]);

    for _ in 1..hashed.len() {
        let mut best: Option<(usize, u32)> = None;
        for (idx, hash) in hashes.iter().enumerate() {
            if visited[idx] {
                continue;
            }
            let dist = hamming_distance(hashes[current], hash);
            // strict `<` keeps the earliest index on ties
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }

        let Some((next, _)) = best else { break };
        visited[next] = true;
        result.push(hashed[next]);
        current = next;
    }

    result.extend(unhashed);
    result
}
