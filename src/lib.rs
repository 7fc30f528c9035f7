//! likes-downloader - media downloader for a social feed's liked posts
//!
//! This library downloads the media (photos, videos, animated images)
//! referenced by the posts liked by the authenticated feed account.
//!
//! # Features
//!
//! - Best-quality variant selection for multi-format video media
//! - Idempotent downloads with a deterministic filename convention
//! - Bounded retry of transient network failures
//! - A persisted blacklist of posts confirmed to carry no media
//! - Optional organization of downloads into per-author subdirectories
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use likes_downloader::{
//!     download_liked_feed, validate_config, Config, DownloadExecutor, FeedClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     validate_config(&config)?;
//!
//!     let feed = FeedClient::new(&config.feed.base_url, &config.feed.token)?;
//!     let executor = DownloadExecutor::from_config(&config, false)?;
//!     let stats = download_liked_feed(&feed, &config, &executor, true).await?;
//!     println!("Downloaded {} media files", stats.media_files);
//!     Ok(())
//! }
//! ```

pub mod blacklist;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod feed;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use blacklist::{filter_posts, reconcile, update_blacklist, BlacklistStore};
pub use config::{validate_config, Config};
pub use download::{
    download_liked_feed, download_single_post, DownloadExecutor, DownloadOutcome, RetryPolicy,
    RunStats,
};
pub use error::{Error, Result};
pub use feed::{FeedClient, Post};
pub use media::{extract_media, Extraction, MediaDescriptor, MediaKind};
