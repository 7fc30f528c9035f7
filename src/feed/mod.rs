//! Feed provider collaborator.
//!
//! The feed is treated as a pure data source: it supplies the ordered list
//! of liked posts for the authenticated account and a single-post lookup.

pub mod client;
pub mod types;

pub use client::FeedClient;
pub use types::{Author, MediaEntry, Post, VideoInfo, VideoVariant};
