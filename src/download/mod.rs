//! Download module.
//!
//! Provides:
//! - The per-post download executor with on-disk idempotency checks
//! - The bounded fixed-interval retry policy
//! - The liked-feed and single-post run pipelines
//! - Run statistics

pub mod executor;
pub mod retry;
pub mod run;
pub mod state;

pub use executor::{DownloadExecutor, DownloadOutcome};
pub use retry::RetryPolicy;
pub use run::{download_liked_feed, download_single_post};
pub use state::RunStats;
