// Gallery service layer
// Implements: gallery source + snapshot store, query marshaling, the filter → order → pack view,
// similar-panel lookup, metadata completeness, and the HTTP handlers on top of them.

pub mod handlers;
pub mod metadata;
pub mod query;
pub mod similar;
pub mod source;
pub mod store;
pub mod view;

pub use source::FileGallerySource;
pub use store::GalleryStore;
