//! Media descriptor representation.

/// Kind of media referenced by a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedImage,
}

/// The resolved download target for one media item of a post.
#[derive(Debug, Clone)]
pub struct MediaDescriptor {
    /// Media URL, taken verbatim from the feed entry or the selected
    /// variant. Any size suffix is appended at download time, not here.
    pub url: String,

    /// Kind of media.
    pub kind: MediaKind,

    /// Whether a query suffix must be appended to the URL to request the
    /// high-resolution rendition. True only for photos.
    pub requires_size_hint: bool,
}

impl MediaDescriptor {
    pub fn new(url: String, kind: MediaKind) -> Self {
        Self {
            url,
            kind,
            requires_size_hint: kind == MediaKind::Photo,
        }
    }
}
