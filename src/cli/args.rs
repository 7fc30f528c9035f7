//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Liked-feed media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "likes-downloader",
    version,
    about = "Download media of the posts liked by the authenticated user",
    long_about = "A CLI tool that downloads photos, videos and animated images referenced\n\
                  by the posts liked by the authenticated feed account, remembering which\n\
                  posts carried no media so they are never fetched again."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Download a single post by ID instead of the liked feed.
    #[arg(long)]
    pub post: Option<String>,

    /// Create and manage per-author subdirectories after downloading.
    #[arg(long)]
    pub organize: bool,

    /// Disable filtering and updating of blacklisted posts.
    #[arg(long)]
    pub disable_blacklist: bool,

    /// Do not check if the files to download already exist on disk.
    #[arg(long)]
    pub force: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}
