//! Feed wire type definitions.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single feed item. Immutable once fetched; the pipeline borrows posts
/// and never copies them.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Opaque, stable post identifier.
    pub id: String,

    /// Post author.
    pub author: Author,

    /// Creation timestamp (day precision is what the pipeline needs).
    pub created_at: DateTime<Utc>,

    /// Optional post text, used only for log context.
    #[serde(default)]
    pub text: Option<String>,

    /// Structured media section. `None` means the post carries no media
    /// section at all, which is distinct from an empty list.
    #[serde(default)]
    pub media: Option<Vec<MediaEntry>>,
}

impl Post {
    /// Post text collapsed to a single line for log messages.
    pub fn text_preview(&self) -> Option<String> {
        self.text.as_ref().map(|t| t.replace('\n', " "))
    }
}

/// Post author details.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    /// Account handle, also used as the filename prefix and the name of an
    /// optional per-author subdirectory.
    pub handle: String,
}

/// One raw media entry inside a post's media section.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntry {
    /// Raw media kind string as sent by the feed. Kept untyped so that
    /// unrecognized kinds can be logged verbatim and skipped.
    #[serde(rename = "type")]
    pub kind: String,

    /// Direct media URL (the photo URL for photo entries).
    pub url: String,

    /// Video details, present for video and animated media entries.
    #[serde(default)]
    pub video: Option<VideoInfo>,
}

/// Video details carrying the encoding variants on offer.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub variants: Vec<VideoVariant>,
}

/// One alternative encoding/quality of a single video entity.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoVariant {
    pub url: String,

    pub content_type: String,

    /// Declared bitrate. Absent means unknown quality (manifest formats).
    #[serde(default)]
    pub bitrate: Option<u64>,
}

impl VideoVariant {
    /// The variant's declared bitrate. A zero bitrate counts as undeclared.
    pub fn declared_bitrate(&self) -> Option<u64> {
        self.bitrate.filter(|b| *b > 0)
    }
}
