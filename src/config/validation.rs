//! Configuration validation logic.

use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration before the run starts.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.feed.base_url.is_empty() {
        return Err(Error::MissingConfig("feed.base_url".to_string()));
    }

    Url::parse(&config.feed.base_url).map_err(|e| Error::ConfigValidation {
        field: "feed.base_url".to_string(),
        message: format!("Not a valid URL: {}", e),
    })?;

    if config.feed.token.is_empty() {
        return Err(Error::MissingConfig("feed.token".to_string()));
    }

    if config.feed.count == 0 {
        return Err(Error::ConfigValidation {
            field: "feed.count".to_string(),
            message: "Feed window must hold at least one post".to_string(),
        });
    }

    if !config.files.download_directory.is_dir() {
        return Err(Error::ConfigValidation {
            field: "files.download_directory".to_string(),
            message: format!(
                "{} is not a valid directory",
                config.files.download_directory.display()
            ),
        });
    }

    if config.download.max_attempts == 0 {
        return Err(Error::ConfigValidation {
            field: "download.max_attempts".to_string(),
            message: "At least one attempt is required".to_string(),
        });
    }

    Ok(())
}
