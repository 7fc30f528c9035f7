//! Media classification and descriptor extraction.

pub mod descriptor;
pub mod extractor;

pub use descriptor::{MediaDescriptor, MediaKind};
pub use extractor::{extract_media, Extraction};
