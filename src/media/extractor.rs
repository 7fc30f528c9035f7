//! Per-post media extraction and variant selection.

use crate::feed::types::{Post, VideoVariant};
use crate::media::descriptor::{MediaDescriptor, MediaKind};

/// Result of classifying one post's media section.
#[derive(Debug)]
pub struct Extraction {
    /// Download targets in order of appearance.
    pub descriptors: Vec<MediaDescriptor>,

    /// False only when the post carried no media section at all. A present
    /// but empty section keeps this true; only structural absence makes a
    /// post eligible for the blacklist.
    pub media_section: bool,
}

impl Extraction {
    fn absent() -> Self {
        Self {
            descriptors: Vec::new(),
            media_section: false,
        }
    }
}

/// Classify a post's media entries into ordered download descriptors.
///
/// Performs no I/O and never fails: entries of unrecognized kinds are
/// logged and skipped without aborting the rest of the post.
pub fn extract_media(post: &Post) -> Extraction {
    let Some(entries) = post.media.as_ref() else {
        match post.text_preview() {
            Some(text) => tracing::warn!(
                "Unable to detect media for post {} - [{}] {}",
                post.id,
                post.author.handle,
                text
            ),
            None => tracing::warn!("Unable to detect media for post {}", post.id),
        }
        return Extraction::absent();
    };

    let mut descriptors = Vec::new();
    for entry in entries {
        match entry.kind.as_str() {
            "photo" => {
                descriptors.push(MediaDescriptor::new(entry.url.clone(), MediaKind::Photo));
            }
            "video" => {
                let variants = entry
                    .video
                    .as_ref()
                    .map(|v| v.variants.as_slice())
                    .unwrap_or_default();
                match select_video_variant(variants) {
                    Some(variant) => descriptors.push(MediaDescriptor::new(
                        variant.url.clone(),
                        MediaKind::Video,
                    )),
                    None => tracing::error!("Video entry without variants in post {}", post.id),
                }
            }
            "animated_gif" => {
                // Exactly one variant is present by construction.
                match entry.video.as_ref().and_then(|v| v.variants.first()) {
                    Some(variant) => descriptors.push(MediaDescriptor::new(
                        variant.url.clone(),
                        MediaKind::AnimatedImage,
                    )),
                    None => {
                        tracing::error!("Animated entry without variants in post {}", post.id)
                    }
                }
            }
            other => {
                tracing::error!("Unrecognized media kind '{}' from post ID {}", other, post.id);
            }
        }
    }

    tracing::debug!(
        "Found {} media URLs from post {}/{}",
        descriptors.len(),
        post.author.handle,
        post.id
    );

    Extraction {
        descriptors,
        media_section: true,
    }
}

/// Select the variant to download among a video's candidate encodings.
///
/// The candidate with the highest declared bitrate wins. Trailing
/// candidates without a bitrate (manifest formats) are discarded first;
/// when no candidate declares a bitrate at all, the last candidate in the
/// original order is used.
fn select_video_variant(variants: &[VideoVariant]) -> Option<&VideoVariant> {
    let (last, mut remaining) = variants.split_last()?;
    let mut best = last;
    tracing::debug!(
        "Considering video variant {} {:?}: {}",
        best.content_type,
        best.declared_bitrate(),
        best.url
    );

    // Skip trailing entries that do not declare a bitrate.
    while best.declared_bitrate().is_none() {
        let Some((next, rest)) = remaining.split_last() else {
            break;
        };
        tracing::debug!(
            "Discarding video variant {} (no bitrate specified): {}",
            best.content_type,
            best.url
        );
        best = next;
        remaining = rest;
    }

    // Pick the variant with the highest declared bitrate.
    for variant in remaining {
        match (variant.declared_bitrate(), best.declared_bitrate()) {
            (Some(bitrate), Some(current)) if bitrate > current => {
                tracing::debug!(
                    "Promoting video variant {} {} (better quality): {}",
                    variant.content_type,
                    bitrate,
                    variant.url
                );
                best = variant;
            }
            _ => tracing::debug!(
                "Discarding video variant {} {:?} (inferior quality): {}",
                variant.content_type,
                variant.declared_bitrate(),
                variant.url
            ),
        }
    }

    if best.declared_bitrate().is_none() {
        // Nothing declares a bitrate: fall back to the last variant in the
        // original order.
        best = last;
    }

    tracing::debug!(
        "Using video variant {} with bitrate={:?}",
        best.url,
        best.declared_bitrate()
    );
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::{Author, MediaEntry, VideoInfo};
    use chrono::{TimeZone, Utc};

    fn variant(bitrate: Option<u64>, url: &str) -> VideoVariant {
        VideoVariant {
            url: url.to_string(),
            content_type: "video/mp4".to_string(),
            bitrate,
        }
    }

    fn post_with_media(media: Option<Vec<MediaEntry>>) -> Post {
        Post {
            id: "1557022684373983234".to_string(),
            author: Author {
                handle: "koirakoirana".to_string(),
            },
            created_at: Utc.with_ymd_and_hms(2022, 8, 9, 13, 8, 45).unwrap(),
            text: Some("a post".to_string()),
            media,
        }
    }

    #[test]
    fn test_select_highest_declared_bitrate() {
        let variants = vec![
            variant(Some(832_000), "a"),
            variant(None, "b"),
            variant(Some(2_176_000), "c"),
        ];
        assert_eq!(select_video_variant(&variants).unwrap().url, "c");
    }

    #[test]
    fn test_select_falls_back_to_original_last_element() {
        let variants = vec![variant(None, "x"), variant(None, "y")];
        assert_eq!(select_video_variant(&variants).unwrap().url, "y");
    }

    #[test]
    fn test_select_skips_trailing_manifest_variant() {
        let variants = vec![
            variant(Some(632_000), "low"),
            variant(Some(950_000), "high"),
            variant(None, "manifest"),
        ];
        assert_eq!(select_video_variant(&variants).unwrap().url, "high");
    }

    #[test]
    fn test_select_treats_zero_bitrate_as_undeclared() {
        let variants = vec![variant(Some(256_000), "real"), variant(Some(0), "zero")];
        assert_eq!(select_video_variant(&variants).unwrap().url, "real");
    }

    #[test]
    fn test_select_empty_variant_list() {
        assert!(select_video_variant(&[]).is_none());
    }

    #[test]
    fn test_extract_photo_requires_size_hint() {
        let post = post_with_media(Some(vec![MediaEntry {
            kind: "photo".to_string(),
            url: "https://img.example.com/a.jpg".to_string(),
            video: None,
        }]));

        let extraction = extract_media(&post);
        assert!(extraction.media_section);
        assert_eq!(extraction.descriptors.len(), 1);
        assert_eq!(extraction.descriptors[0].kind, MediaKind::Photo);
        assert!(extraction.descriptors[0].requires_size_hint);
        assert_eq!(extraction.descriptors[0].url, "https://img.example.com/a.jpg");
    }

    #[test]
    fn test_extract_animated_image_uses_single_variant() {
        let post = post_with_media(Some(vec![MediaEntry {
            kind: "animated_gif".to_string(),
            url: "https://img.example.com/thumb.jpg".to_string(),
            video: Some(VideoInfo {
                variants: vec![variant(Some(0), "https://vid.example.com/a.mp4")],
            }),
        }]));

        let extraction = extract_media(&post);
        assert_eq!(extraction.descriptors.len(), 1);
        assert_eq!(extraction.descriptors[0].kind, MediaKind::AnimatedImage);
        assert!(!extraction.descriptors[0].requires_size_hint);
        assert_eq!(extraction.descriptors[0].url, "https://vid.example.com/a.mp4");
    }

    #[test]
    fn test_extract_unknown_kind_skips_single_entry() {
        let post = post_with_media(Some(vec![
            MediaEntry {
                kind: "hologram".to_string(),
                url: "https://img.example.com/h.bin".to_string(),
                video: None,
            },
            MediaEntry {
                kind: "photo".to_string(),
                url: "https://img.example.com/b.jpg".to_string(),
                video: None,
            },
        ]));

        let extraction = extract_media(&post);
        assert!(extraction.media_section);
        assert_eq!(extraction.descriptors.len(), 1);
        assert_eq!(extraction.descriptors[0].url, "https://img.example.com/b.jpg");
    }

    #[test]
    fn test_extract_without_media_section() {
        let post = post_with_media(None);
        let extraction = extract_media(&post);
        assert!(!extraction.media_section);
        assert!(extraction.descriptors.is_empty());
    }

    #[test]
    fn test_extract_preserves_entry_order() {
        let post = post_with_media(Some(vec![
            MediaEntry {
                kind: "photo".to_string(),
                url: "https://img.example.com/1.jpg".to_string(),
                video: None,
            },
            MediaEntry {
                kind: "video".to_string(),
                url: "https://img.example.com/thumb.jpg".to_string(),
                video: Some(VideoInfo {
                    variants: vec![variant(Some(832_000), "https://vid.example.com/2.mp4")],
                }),
            },
        ]));

        let extraction = extract_media(&post);
        let urls: Vec<&str> = extraction.descriptors.iter().map(|d| d.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://img.example.com/1.jpg", "https://vid.example.com/2.mp4"]
        );
    }
}
