//! Configuration module.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, DownloadConfig, FeedConfig, FilesConfig, OrganizeConfig};
pub use validation::validate_config;
