//! Output module for console output.
//!
//! Provides:
//! - Colored console output
//! - Run statistics reporting

pub mod console;
pub mod stats;

pub use console::{print_banner, print_error, print_info, print_warning};
pub use stats::print_run_stats;
