//! Run pipelines: the liked feed and the single-post lookup.

use crate::blacklist::{filter_posts, update_blacklist, BlacklistStore};
use crate::config::Config;
use crate::download::executor::DownloadExecutor;
use crate::download::state::RunStats;
use crate::error::{Error, Result};
use crate::feed::client::FeedClient;
use crate::feed::types::Post;
use crate::media::extractor::extract_media;

/// Download media from all liked posts of the authenticated account.
///
/// Blacklisted posts are filtered out up front; posts confirmed media-less
/// this run are added to the blacklist at the end, reconciled against the
/// full unfiltered feed. A post whose retry budget is exhausted aborts the
/// run.
pub async fn download_liked_feed(
    feed: &FeedClient,
    config: &Config,
    executor: &DownloadExecutor,
    use_blacklist: bool,
) -> Result<RunStats> {
    let all_posts = feed.liked_posts(config.feed.count).await?;
    let store = BlacklistStore::new(config.files.blacklist_file.clone());

    let posts: Vec<&Post> = if use_blacklist {
        let blacklisted = store.load()?;
        tracing::info!("Found {} blacklisted posts", blacklisted.len());
        let filtered = filter_posts(&all_posts, &blacklisted);
        tracing::debug!("{} posts available after filtering", filtered.len());
        filtered
    } else {
        all_posts.iter().collect()
    };

    let total = posts.len();
    let mut stats = RunStats::default();
    let mut new_blacklisted: Vec<String> = Vec::new();

    for post in posts {
        tracing::debug!("Processing post {}", post.id);
        let extraction = extract_media(post);
        let outcome = executor.process(post, &extraction.descriptors).await?;
        stats.record(&outcome);

        // Only structural absence of media makes a post blacklist-eligible;
        // files already on disk never do.
        if use_blacklist && outcome.new_files == 0 && !extraction.media_section {
            new_blacklisted.push(post.id.clone());
            tracing::debug!("Blacklisted post ID {}", post.id);
        }
    }

    tracing::info!(
        "Downloaded {} media files from {} of {} posts.",
        stats.media_files,
        stats.posts_with_media,
        total
    );

    if use_blacklist {
        update_blacklist(&store, &new_blacklisted, &all_posts)?;
        stats.posts_blacklisted = new_blacklisted.len() as u64;
    }

    Ok(stats)
}

/// Download media from a single post looked up by identifier.
///
/// The blacklist is neither consulted nor updated here.
pub async fn download_single_post(
    feed: &FeedClient,
    executor: &DownloadExecutor,
    post_id: &str,
) -> Result<RunStats> {
    let post = feed
        .post_by_id(post_id)
        .await?
        .ok_or_else(|| Error::PostNotFound(post_id.to_string()))?;

    tracing::debug!("Processing post {}", post.id);
    let extraction = extract_media(&post);
    let outcome = executor.process(&post, &extraction.descriptors).await?;

    let mut stats = RunStats::default();
    stats.record(&outcome);
    tracing::info!("Downloaded {} media files.", outcome.new_files);
    Ok(stats)
}
