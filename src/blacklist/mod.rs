//! Blacklist of posts confirmed to carry no media.
//!
//! Provides:
//! - The persisted blacklist file (load, create, save)
//! - Feed filtering and end-of-run reconciliation

pub mod filter;
pub mod store;

pub use filter::{filter_posts, reconcile, update_blacklist};
pub use store::BlacklistStore;
