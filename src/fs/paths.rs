//! Download target path resolution and idempotency checks.

use std::path::{Path, PathBuf};

/// Candidate locations for one media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    /// Where a new download is written: `download_dir/filename`.
    pub primary: PathBuf,

    /// `download_dir/{author}/filename`, present only when a subdirectory
    /// named after the author already exists. Consulted for the on-disk
    /// check but never created by the downloader.
    pub alternate: Option<PathBuf>,
}

impl TargetPaths {
    /// Whether the file already exists (with content) at either location.
    pub fn already_on_disk(&self) -> bool {
        let alternate = self
            .alternate
            .as_deref()
            .map(is_nonempty_file)
            .unwrap_or(false);
        alternate || is_nonempty_file(&self.primary)
    }
}

/// Resolve the primary and alternate target paths for a filename.
pub fn resolve_target_paths(download_dir: &Path, author: &str, filename: &str) -> TargetPaths {
    let primary = download_dir.join(filename);

    let author_dir = download_dir.join(author);
    let alternate = if author_dir.is_dir() {
        tracing::debug!("Found subdirectory {}", author);
        Some(author_dir.join(filename))
    } else {
        None
    };

    match &alternate {
        Some(extra) => tracing::debug!(
            "Final download path is {}, but will also check {}",
            primary.display(),
            extra.display()
        ),
        None => tracing::debug!("Final download path is {}", primary.display()),
    }

    TargetPaths { primary, alternate }
}

/// Check whether a regular file with size greater than 0 exists at `path`.
///
/// A zero-byte file does not count: it is the leftover of a failed prior
/// write and must be downloaded again.
pub fn is_nonempty_file(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    if metadata.len() > 0 {
        tracing::debug!("File {} already on disk", path.display());
        true
    } else {
        tracing::warn!(
            "File {} is on disk but has size 0, downloading again",
            path.display()
        );
        false
    }
}
