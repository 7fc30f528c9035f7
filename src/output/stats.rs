//! Run statistics reporting.

use console::style;

use crate::download::state::RunStats;

/// Print the end-of-run statistics.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("Run statistics:").bold());
    println!("  Posts processed:   {}", stats.posts_processed);
    println!("  Posts with media:  {}", stats.posts_with_media);
    println!(
        "  Media files:       {} downloaded",
        style(stats.media_files).green()
    );
    if stats.posts_blacklisted > 0 {
        println!(
            "  Newly blacklisted: {}",
            style(stats.posts_blacklisted).yellow()
        );
    }
}
