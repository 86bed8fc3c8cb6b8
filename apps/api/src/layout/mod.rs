// Masonry Packer
// Implements: responsive column count, shortest-column placement, two-column spanning for wide panels.
// Pure and deterministic; the caller re-invokes it wholesale on every relayout.

pub mod columns;
pub mod masonry;

// Re-export the public API consumed by the gallery handlers.
pub use columns::{control_offsets, ColumnRule, LayoutConfig};
pub use masonry::{compute_layout, MasonryLayout};
