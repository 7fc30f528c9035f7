//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,

    pub files: FilesConfig,

    #[serde(default)]
    pub organize: OrganizeConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

/// Feed provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Feed provider API base URL.
    pub base_url: String,

    /// Bearer token for the authenticated account.
    pub token: String,

    /// Number of liked posts to fetch per run (the feed window).
    #[serde(default = "default_feed_count")]
    pub count: u32,
}

/// Filesystem locations.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Destination directory for downloads. Must already exist.
    pub download_directory: PathBuf,

    /// Path to the blacklist file. Created on first run if missing.
    pub blacklist_file: PathBuf,
}

/// Directory organization options.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizeConfig {
    /// Minimum number of media files from one author before a
    /// subdirectory is created for them.
    #[serde(default = "default_dir_threshold")]
    pub create_dir_after_files: u64,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            create_dir_after_files: default_dir_threshold(),
        }
    }
}

/// Media download and retry options.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum download attempts, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Maximum elapsed wall-clock seconds across all attempts.
    #[serde(default = "default_max_elapsed")]
    pub max_elapsed_seconds: u64,

    /// Fixed wait between attempts, in seconds.
    #[serde(default = "default_wait")]
    pub wait_seconds: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_attempts: default_max_attempts(),
            max_elapsed_seconds: default_max_elapsed(),
            wait_seconds: default_wait(),
        }
    }
}

fn default_feed_count() -> u32 {
    200
}

fn default_dir_threshold() -> u64 {
    10
}

fn default_timeout() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    5
}

fn default_max_elapsed() -> u64 {
    60
}

fn default_wait() -> u64 {
    3
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
