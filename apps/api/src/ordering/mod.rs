// Similarity & Order Engine
// Implements: chronological sorts, perceptual-hash similarity walk, hue spectrum walk.
// Every ordering is a permutation of its input; missing similarity data sorts last.

pub mod color;
pub mod similarity;
pub mod sort_mode;

pub use color::palette_distance;
pub use similarity::{hamming_distance, HashField};
pub use sort_mode::{sort_panels, SortMode};
