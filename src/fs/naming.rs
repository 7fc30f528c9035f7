//! Filename convention for downloaded media.
//!
//! Downloaded files are named `{author}_{YYYY-MM-DD}_{postId}_{index}.{ext}`,
//! e.g. `koirakoirana_2022-08-09_1557022684373983234_1.jpg`. The index is
//! 1-based per post.

use std::path::Path;

use chrono::NaiveDate;
use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

/// Expected filename format for downloaded media.
const FILENAME_PATTERN: &str =
    r"^(?P<author>\w+)_(?P<date>\d{4}-\d{2}-\d{2})_(?P<id>\d*)_(?P<index>\d+)\.(?P<extension>\w+)$";

/// Fields recovered from a filename following the download convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMediaFilename {
    pub author: String,
    pub date: NaiveDate,
    pub post_id: String,
    pub index: u32,
    pub extension: String,
}

/// Build the destination filename for one media item of a post.
pub fn build_media_filename(
    author: &str,
    date: NaiveDate,
    post_id: &str,
    index: u32,
    extension: &str,
) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        author,
        date.format("%Y-%m-%d"),
        post_id,
        index,
        extension
    )
}

/// Parse a filename produced by [`build_media_filename`] back into its
/// fields.
///
/// Fails with [`Error::UnrecognizedFilename`] on anything that does not
/// match the convention. That failure is an expected signal, not a fault:
/// the download directory may well contain files this pipeline never wrote.
pub fn parse_media_filename(filename: &str) -> Result<ParsedMediaFilename> {
    let pattern = Regex::new(FILENAME_PATTERN).unwrap();
    let captures = pattern
        .captures(filename)
        .ok_or_else(|| Error::UnrecognizedFilename(filename.to_string()))?;

    let date = NaiveDate::parse_from_str(&captures["date"], "%Y-%m-%d")
        .map_err(|_| Error::UnrecognizedFilename(filename.to_string()))?;
    let index = captures["index"]
        .parse()
        .map_err(|_| Error::UnrecognizedFilename(filename.to_string()))?;

    Ok(ParsedMediaFilename {
        author: captures["author"].to_string(),
        date,
        post_id: captures["id"].to_string(),
        index,
        extension: captures["extension"].to_string(),
    })
}

/// Extract the file extension (without the leading dot) from a media URL.
///
/// Returns an empty string when the URL path carries no extension.
pub fn file_extension_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let extension = Path::new(parsed.path())
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();

    tracing::debug!("Found '{}' file extension in URL {}", extension, url);
    Ok(extension)
}
