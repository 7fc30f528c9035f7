//! Filesystem module.
//!
//! Provides:
//! - The on-disk filename convention (build and parse)
//! - Download target path resolution
//! - Post-hoc organization of the download directory by author

pub mod naming;
pub mod organize;
pub mod paths;

pub use naming::{
    build_media_filename, file_extension_from_url, parse_media_filename, ParsedMediaFilename,
};
pub use organize::organize_media;
pub use paths::{is_nonempty_file, resolve_target_paths, TargetPaths};
