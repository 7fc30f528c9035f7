//! Blacklist filtering and end-of-run reconciliation.

use std::collections::HashSet;

use crate::blacklist::store::BlacklistStore;
use crate::error::Result;
use crate::feed::types::Post;

/// Drop every post whose identifier is blacklisted, preserving order.
pub fn filter_posts<'a>(posts: &'a [Post], blacklisted: &[String]) -> Vec<&'a Post> {
    let mut filtered = Vec::new();
    for post in posts {
        if blacklisted.iter().any(|id| id == &post.id) {
            tracing::debug!("Removing blacklisted post ID {}", post.id);
        } else {
            filtered.push(post);
        }
    }
    filtered
}

/// Merge the previous blacklist with this run's new entries.
///
/// A previous entry survives only while its post still appears in the
/// freshly fetched feed window; once a post has aged out it can never be
/// re-confirmed, so it is pruned. Returns `None` when nothing changed and
/// the write can be skipped.
pub fn reconcile(
    previous: &[String],
    new_entries: &[String],
    fetched_ids: &HashSet<&str>,
) -> Option<Vec<String>> {
    let valid: Vec<String> = previous
        .iter()
        .filter(|id| fetched_ids.contains(id.as_str()))
        .cloned()
        .collect();

    if new_entries.is_empty() && valid.len() == previous.len() {
        return None;
    }

    let mut merged = valid;
    for id in new_entries {
        if !merged.contains(id) {
            merged.push(id.clone());
        }
    }
    Some(merged)
}

/// Reconcile the persisted blacklist against the full unfiltered feed and
/// write it back, skipping the write when nothing changed.
pub fn update_blacklist(
    store: &BlacklistStore,
    new_entries: &[String],
    all_posts: &[Post],
) -> Result<()> {
    let fetched_ids: HashSet<&str> = all_posts.iter().map(|p| p.id.as_str()).collect();

    let previous = store.load()?;
    let Some(merged) = reconcile(&previous, new_entries, &fetched_ids) else {
        tracing::debug!("Blacklist doesn't need updating");
        return Ok(());
    };

    let expired = previous.len() - previous.iter().filter(|id| fetched_ids.contains(id.as_str())).count();
    tracing::info!("Will remove {} expired post IDs from blacklist", expired);

    store.save(&merged)?;
    tracing::info!(
        "Saved blacklist file with {} IDs ({} added, {} removed)",
        merged.len(),
        new_entries.len(),
        expired
    );
    Ok(())
}
