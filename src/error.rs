//! Error types for the likes-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Feed errors
    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // Blacklist errors
    #[error(
        "Blacklist file {path} is malformed: {message}. \
         Delete the file and a new one will be created on the next run."
    )]
    BlacklistMalformed { path: String, message: String },

    // Filename errors
    #[error("Failed to parse filename: {0}")]
    UnrecognizedFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Whether the error is a transient download failure worth retrying.
    ///
    /// Only the media-fetch path produces [`Error::Download`]; everything
    /// else (configuration, filesystem writes, feed lookups) is permanent
    /// from the retry loop's point of view.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Download(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const FEED_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
