//! Per-invocation setup shared by the commands

use anyhow::{Context, Result};
use contentflow_adapters::{
    feed::{JsonFileFeed, SampleFeed},
    seed::seed_store,
};
use contentflow_domain::{
    Clock, FixedClock, PostFeed, PostStore, SystemClock,
    usecases::{SchedulingConfig, SchedulingService},
};
use std::path::PathBuf;
use std::sync::Arc;
use time::{Date, PrimitiveDateTime};

use crate::config::AppConfig;

/// Global flags every command honours
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub posts: Option<PathBuf>,
    pub now: Option<PrimitiveDateTime>,
}

/// Loaded configuration plus a store seeded from the configured feed
pub struct Session {
    pub config: AppConfig,
    pub clock: Arc<dyn Clock>,
    pub service: SchedulingService,
}

impl Session {
    pub async fn open(opts: &GlobalOpts) -> Result<Self> {
        let config = AppConfig::load(opts.config.as_deref())?;

        let clock: Arc<dyn Clock> = match opts.now {
            Some(now) => Arc::new(FixedClock::at(now)),
            None => Arc::new(SystemClock),
        };

        let posts_file = opts.posts.as_ref().or(config.general.posts_file.as_ref());
        let feed: Box<dyn PostFeed> = match posts_file {
            Some(path) => Box::new(JsonFileFeed::new(path)),
            None => Box::new(SampleFeed::new(clock.clone())),
        };

        let mut store = PostStore::new(clock.clone());
        let report = seed_store(feed.as_ref(), &mut store)
            .await
            .with_context(|| format!("Failed to load posts from {}", feed.name()))?;

        if report.skipped > 0 {
            tracing::warn!(
                skipped = report.skipped,
                "Some posts were rejected while loading"
            );
        }

        let service = SchedulingService::new(
            store,
            SchedulingConfig {
                recent_limit: config.scheduling.recent_limit,
            },
        );

        Ok(Self {
            config,
            clock,
            service,
        })
    }

    pub fn now(&self) -> PrimitiveDateTime {
        self.clock.wall_clock()
    }

    pub fn today(&self) -> Date {
        self.now().date()
    }
}
