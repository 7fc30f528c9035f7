//! Persisted blacklist file.
//!
//! The blacklist is a TOML file with a single recognized key holding the
//! blacklisted post identifiers:
//!
//! ```toml
//! # Add your blacklisted post IDs to the list below, one per line
//! blacklisted_ids = []
//! ```

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Comment header written at the top of a fresh blacklist file.
const FILE_HEADER: &str = "# Add your blacklisted post IDs to the list below, one per line";

/// On-disk shape of the blacklist file.
#[derive(Debug, Serialize, Deserialize)]
struct BlacklistFile {
    blacklisted_ids: Vec<String>,
}

/// Handle to the blacklist file.
pub struct BlacklistStore {
    path: PathBuf,
}

impl BlacklistStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the blacklisted post identifiers.
    ///
    /// A missing file is not an error: a default empty one is created and
    /// an empty list returned. A file that cannot be parsed, or parses but
    /// lacks the expected key, is fatal; the operator is told to delete it.
    pub fn load(&self) -> Result<Vec<String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Creating default blacklist file in {}", self.path.display());
                self.save(&[])?;
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!("Failed to load blacklist file {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        let parsed: BlacklistFile = toml::from_str(&content).map_err(|e| {
            Error::BlacklistMalformed {
                path: self.path.display().to_string(),
                message: e.message().to_string(),
            }
        })?;

        Ok(parsed.blacklisted_ids)
    }

    /// Write the blacklist file with the given identifiers.
    pub fn save(&self, ids: &[String]) -> Result<()> {
        let body = toml::to_string(&BlacklistFile {
            blacklisted_ids: ids.to_vec(),
        })?;

        tracing::debug!(
            "Writing {} with {} blacklisted post IDs",
            self.path.display(),
            ids.len()
        );
        std::fs::write(&self.path, format!("{}\n{}", FILE_HEADER, body)).map_err(|e| {
            tracing::error!("Failed to write blacklist file: {}", e);
            Error::from(e)
        })
    }
}
