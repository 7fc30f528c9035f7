//! Post-hoc organization of the download directory.
//!
//! Scans the flat download directory, creates a subdirectory per author
//! once enough of their media files have accumulated, and moves files into
//! whichever author subdirectories exist. Files that do not follow the
//! download naming convention are left untouched.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::fs::naming::parse_media_filename;

/// Scan the download directory and move media files into per-author
/// subdirectories.
pub fn organize_media(download_dir: &Path, threshold: u64) -> Result<()> {
    tracing::info!("Organizing directory {}", download_dir.display());

    let media_count = scan_directory(download_dir)?;
    create_author_directories(&media_count, threshold, download_dir)?;

    let available = list_subdirectories(download_dir)?;
    move_files_to_subdirectories(download_dir, &available)
}

/// Count parseable media files per author in the download directory.
fn scan_directory(download_dir: &Path) -> Result<HashMap<String, u64>> {
    let mut media_count: HashMap<String, u64> = HashMap::new();

    for entry in std::fs::read_dir(download_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            tracing::debug!("{} is not a file", entry.file_name().to_string_lossy());
            continue;
        }

        let filename = entry.file_name();
        let Some(filename) = filename.to_str() else {
            continue;
        };

        match parse_media_filename(filename) {
            Ok(parsed) => {
                tracing::debug!("Found author {} from file {}", parsed.author, filename);
                *media_count.entry(parsed.author).or_default() += 1;
            }
            Err(_) => {
                tracing::debug!("Unable to find an author in filename {}", filename);
            }
        }
    }

    Ok(media_count)
}

/// Create a subdirectory for every author at or over the file threshold.
fn create_author_directories(
    media_count: &HashMap<String, u64>,
    threshold: u64,
    download_dir: &Path,
) -> Result<()> {
    for (author, files) in media_count {
        if *files < threshold {
            tracing::debug!(
                "Not enough media files to create directory {} (found {})",
                author,
                files
            );
            continue;
        }

        let new_directory = download_dir.join(author);
        match std::fs::create_dir(&new_directory) {
            Ok(()) => tracing::info!(
                "Created new directory {} (found {} files)",
                new_directory.display(),
                files
            ),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!("Directory {} already exists", new_directory.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// List the names of all subdirectories of the download directory.
fn list_subdirectories(download_dir: &Path) -> Result<Vec<String>> {
    let mut subdirectories = Vec::new();

    for entry in std::fs::read_dir(download_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                subdirectories.push(name.to_string());
            }
        }
    }

    tracing::debug!("Found {} existing subdirectories", subdirectories.len());
    Ok(subdirectories)
}

/// Move every file whose author has a matching subdirectory.
///
/// Planned in a first pass so the directory structure is not mutated while
/// it is being scanned; individual move failures are logged and skipped.
fn move_files_to_subdirectories(download_dir: &Path, available: &[String]) -> Result<()> {
    let mut files_to_move: Vec<(String, String)> = Vec::new();

    for entry in std::fs::read_dir(download_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let filename = entry.file_name();
        let Some(filename) = filename.to_str() else {
            continue;
        };

        let Ok(parsed) = parse_media_filename(filename) else {
            continue;
        };

        if available.contains(&parsed.author) {
            tracing::debug!(
                "File {} will be moved into subdirectory {}",
                filename,
                parsed.author
            );
            files_to_move.push((parsed.author, filename.to_string()));
        }
    }

    if files_to_move.is_empty() {
        tracing::info!("No files need to be moved");
        return Ok(());
    }

    for (subdirectory, filename) in files_to_move {
        let source = download_dir.join(&filename);
        let destination = download_dir.join(&subdirectory).join(&filename);

        tracing::info!("Moving {} into {}/{}", filename, subdirectory, filename);
        if let Err(e) = std::fs::rename(&source, &destination) {
            tracing::error!(
                "Failed to move file {} to {}: {}",
                source.display(),
                destination.display(),
                e
            );
        }
    }

    Ok(())
}
