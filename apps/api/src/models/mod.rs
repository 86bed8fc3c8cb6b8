pub mod panel;

pub use panel::{GalleryDocument, LabColor, Panel};
