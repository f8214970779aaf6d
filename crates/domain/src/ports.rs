//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::model::PostDraft;

/// Error type for post feed operations
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
}

/// Port for loading seed posts from an external data source
#[async_trait]
pub trait PostFeed: Send + Sync {
    /// Load every post the feed provides
    async fn load(&self) -> Result<Vec<PostDraft>, FeedError>;

    /// Human-readable name for logs
    fn name(&self) -> String;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;

    /// Current time as a wall-clock reading, offset dropped
    fn wall_clock(&self) -> PrimitiveDateTime {
        let now = self.now();
        PrimitiveDateTime::new(now.date(), now.time())
    }
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: OffsetDateTime,
}

impl FixedClock {
    pub fn new(time: OffsetDateTime) -> Self {
        Self { time }
    }

    /// Fixed clock reading the given wall-clock time in UTC
    pub fn at(wall_clock: PrimitiveDateTime) -> Self {
        Self {
            time: wall_clock.assume_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_fixed_clock_wall_clock_drops_offset() {
        let clock = FixedClock::new(datetime!(2026-10-17 09:30 +05:00));
        assert_eq!(clock.wall_clock(), datetime!(2026-10-17 09:30));
    }

    #[test]
    fn test_fixed_clock_at_round_trips() {
        let clock = FixedClock::at(datetime!(2026-10-17 09:30));
        assert_eq!(clock.wall_clock(), datetime!(2026-10-17 09:30));
    }
}
