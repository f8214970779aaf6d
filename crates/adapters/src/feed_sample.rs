//! Built-in demo posts, positioned around the current time

use async_trait::async_trait;
use contentflow_domain::{
    Clock, DayOfWeek, FeedError, Platform, PostBody, PostDraft, PostFeed, PostStatus, Priority,
    RecurrenceRule,
};
use std::sync::Arc;
use time::{Duration, PrimitiveDateTime, Time};

/// Feed of sample posts for trying the tool without a data file
pub struct SampleFeed {
    clock: Arc<dyn Clock>,
}

impl SampleFeed {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Drafts relative to `now`: a mix of future scheduled, past and pending posts
    pub fn drafts_at(now: PrimitiveDateTime) -> Vec<PostDraft> {
        // hours relative to the start of today
        let today = now.date().with_time(Time::MIDNIGHT);
        let at = |hours: i64| today.checked_add(Duration::hours(hours));

        let mut drafts = Vec::new();
        let mut push = |offset: Option<i64>, status: PostStatus, body: PostBody| {
            let body = match offset {
                Some(hours) => match at(hours) {
                    Some(when) => body.scheduled_for(when),
                    None => return,
                },
                None => body,
            };
            drafts.push(PostDraft::from(body).with_status(status));
        };

        push(
            Some(24 + 9),
            PostStatus::Scheduled,
            PostBody::new(
                "Product launch teaser",
                "Something new is coming tomorrow. Stay tuned!",
            )
            .with_platform(Platform::Twitter)
            .with_platform(Platform::Linkedin)
            .tagged(Priority::High, &["launch"]),
        );
        push(
            Some(2 * 24 + 14),
            PostStatus::Scheduled,
            PostBody::new(
                "Behind the scenes reel",
                "A quick look at how the team ships every week.",
            )
            .with_platform(Platform::Instagram)
            .with_platform(Platform::Tiktok)
            .tagged(Priority::Medium, &["culture"]),
        );
        push(
            Some(3 * 24 + 9),
            PostStatus::Scheduled,
            PostBody::new("Monday tips", "Three habits for a calmer inbox.")
                .with_platform(Platform::Linkedin)
                .repeating(RecurrenceRule::Custom, [DayOfWeek::Monday, DayOfWeek::Thursday])
                .tagged(Priority::Low, &["tips"]),
        );
        push(
            Some(5 * 24 + 18),
            PostStatus::Scheduled,
            PostBody::new(
                "Community AMA",
                "Join our live Q&A with the founders this Friday evening.",
            )
            .with_platform(Platform::Youtube)
            .with_platform(Platform::Reddit)
            .tagged(Priority::Urgent, &["community", "live"]),
        );
        push(
            Some(-24 + 10),
            PostStatus::Published,
            PostBody::new("Weekly recap", "Here is what we shipped this week.")
                .with_platform(Platform::Facebook)
                .tagged(Priority::Medium, &["recap"]),
        );
        push(
            Some(-3 * 24 + 16),
            PostStatus::Published,
            PostBody::new("Customer story", "How a small bakery grew 3x with scheduled posts.")
                .with_platform(Platform::Linkedin)
                .with_platform(Platform::Facebook)
                .tagged(Priority::Medium, &["customers"]),
        );
        push(
            Some(-2 * 24 + 12),
            PostStatus::Failed,
            PostBody::new("Flash sale", "24 hours only: 30% off annual plans.")
                .with_platform(Platform::Instagram)
                .tagged(Priority::High, &["sales"]),
        );
        push(
            None,
            PostStatus::Pending,
            PostBody::new("Partner announcement", "Waiting on sign-off from legal.")
                .with_platform(Platform::Twitter)
                .tagged(Priority::Medium, &["partners"]),
        );
        push(
            None,
            PostStatus::Draft,
            PostBody::new("Holiday campaign ideas", ""),
        );

        drafts
    }
}

#[async_trait]
impl PostFeed for SampleFeed {
    async fn load(&self) -> Result<Vec<PostDraft>, FeedError> {
        Ok(Self::drafts_at(self.clock.wall_clock()))
    }

    fn name(&self) -> String {
        "sample".to_string()
    }
}

trait Tagged {
    fn tagged(self, priority: Priority, tags: &[&str]) -> Self;
}

impl Tagged for PostBody {
    fn tagged(mut self, priority: Priority, tags: &[&str]) -> Self {
        self.priority = priority;
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentflow_domain::{FixedClock, PostStore};
    use time::macros::datetime;

    const NOW: PrimitiveDateTime = datetime!(2026-10-17 12:30);

    #[tokio::test]
    async fn test_sample_feed_is_relative_to_clock() {
        let feed = SampleFeed::new(Arc::new(FixedClock::at(NOW)));
        let drafts = feed.load().await.unwrap();

        assert_eq!(drafts.len(), 9);
        assert_eq!(
            drafts[0].body.scheduled_at,
            Some(datetime!(2026-10-18 09:00))
        );
    }

    #[tokio::test]
    async fn test_every_sample_post_is_accepted() {
        let clock = Arc::new(FixedClock::at(NOW));
        let mut store = PostStore::new(clock.clone());

        for draft in SampleFeed::new(clock).load().await.unwrap() {
            store.add(draft).unwrap();
        }

        assert_eq!(store.len(), 9);
        assert_eq!(store.query_upcoming(NOW).len(), 5);
        assert_eq!(store.query_recent(NOW, 5).len(), 3);
    }
}
