// Facet & Filter Engine
// Implements: set membership against the four filter dimensions, cross-dimensional facet counts.
// Pure functions over borrowed panels; no I/O, no logging on the hot path.

pub mod counts;
pub mod filter;

pub use counts::{compute_facets, FacetOptions};
pub use filter::{apply_filters, Filters};
