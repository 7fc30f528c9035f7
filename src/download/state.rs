//! Run statistics.

use crate::download::executor::DownloadOutcome;

/// Aggregated counters for one run.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Posts handed to the executor.
    pub posts_processed: u64,

    /// Posts that yielded at least one newly written file.
    pub posts_with_media: u64,

    /// Media files newly written to disk.
    pub media_files: u64,

    /// Posts confirmed media-less this run and queued for the blacklist.
    pub posts_blacklisted: u64,
}

impl RunStats {
    /// Fold one post's outcome into the counters.
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        self.posts_processed += 1;
        if outcome.new_files > 0 {
            self.posts_with_media += 1;
            self.media_files += outcome.new_files;
        }
    }
}
