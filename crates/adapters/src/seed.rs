//! Loading a post feed into a store

use contentflow_domain::{FeedError, PostFeed, PostStore};

/// Outcome of seeding a store from a feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub loaded: usize,
    pub skipped: usize,
    pub warnings: usize,
}

/// Add every draft from `feed` to `store`.
///
/// Drafts the store rejects are skipped and counted; only a feed failure
/// aborts the load.
pub async fn seed_store(
    feed: &dyn PostFeed,
    store: &mut PostStore,
) -> Result<SeedReport, FeedError> {
    let drafts = feed.load().await?;
    let mut report = SeedReport::default();

    for draft in drafts {
        let title = draft.body.title.clone();
        match store.add(draft) {
            Ok(saved) => {
                report.loaded += 1;
                report.warnings += saved.warnings.len();
            }
            Err(e) => {
                tracing::warn!(feed = %feed.name(), title = %title, error = %e, "Skipping post");
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        feed = %feed.name(),
        loaded = report.loaded,
        skipped = report.skipped,
        "Seeded post store"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::JsonFileFeed;
    use contentflow_domain::{FixedClock, PostId};
    use std::sync::Arc;
    use tempfile::TempDir;
    use time::macros::datetime;

    #[tokio::test]
    async fn test_seed_skips_invalid_posts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            format!(
                r#"[
                    {{"id": 3, "title": "Ok", "content": "Body", "platforms": ["twitter"], "scheduledAt": "2026-10-20T09:00"}},
                    {{"title": "Past", "content": "Body", "platforms": ["twitter"], "scheduledAt": "2026-10-01T09:00", "status": "scheduled"}},
                    {{"id": 3, "title": "Dup", "status": "draft"}},
                    {{"title": "Long", "content": "{}", "platforms": ["twitter"], "scheduledAt": "2026-10-21T09:00"}}
                ]"#,
                "a".repeat(281)
            ),
        )
        .unwrap();

        let mut store = PostStore::new(Arc::new(FixedClock::at(datetime!(2026-10-17 12:00))));
        let report = seed_store(&JsonFileFeed::new(&path), &mut store).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                loaded: 2,
                skipped: 2,
                warnings: 1,
            }
        );
        assert!(store.get(PostId(3)).is_some());
        assert!(store.get(PostId(4)).is_some());
    }

    #[tokio::test]
    async fn test_feed_failure_aborts() {
        let dir = TempDir::new().unwrap();
        let mut store = PostStore::new(Arc::new(FixedClock::at(datetime!(2026-10-17 12:00))));

        let feed = JsonFileFeed::new(dir.path().join("missing.json"));
        let result = seed_store(&feed, &mut store).await;
        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
