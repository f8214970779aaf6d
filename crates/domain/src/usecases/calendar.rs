//! Calendar projection - month/week/day views derived from the store
//!
//! Weeks start on Sunday. A post belongs to a day when the calendar date
//! of its `scheduled_at` matches; time of day only matters for hour buckets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

use crate::{
    model::{Post, PostId, PostPatch, calendar_date},
    store::{PostStore, Saved, StoreError},
};

/// Granularity of the visible calendar window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        })
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}

/// Posts on one calendar day, ascending by time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    #[serde(with = "calendar_date")]
    pub date: Date,
    pub posts: Vec<Post>,
}

impl DayBucket {
    /// The first `cap` posts, for cells with limited room
    pub fn visible(&self, cap: usize) -> &[Post] {
        &self.posts[..self.posts.len().min(cap)]
    }

    /// How many posts `visible(cap)` leaves out
    pub fn overflow(&self, cap: usize) -> usize {
        self.posts.len().saturating_sub(cap)
    }
}

/// Posts within one hour of a day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    pub hour: u8,
    pub posts: Vec<Post>,
}

/// One day split into 24 hour buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHours {
    #[serde(with = "calendar_date")]
    pub date: Date,
    pub hours: Vec<HourBucket>,
}

impl DayHours {
    pub fn post_count(&self) -> usize {
        self.hours.iter().map(|h| h.posts.len()).sum()
    }
}

/// Month laid out in Sunday-first rows of seven.
///
/// Cells before the 1st are `None`; the last row is not padded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u8,
    pub cells: Vec<Option<DayBucket>>,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<DayBucket>]> {
        self.cells.chunks(7)
    }

    pub fn bucket(&self, date: Date) -> Option<&DayBucket> {
        self.cells.iter().flatten().find(|b| b.date == date)
    }
}

/// Seven consecutive days starting on a Sunday
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid {
    #[serde(with = "calendar_date")]
    pub start: Date,
    pub days: Vec<DayHours>,
}

/// Where a dragged post was released
///
/// Drops never reset the clock time to a round value: a month-cell drop
/// keeps the post's time of day instead of landing at midnight, and an
/// hour-slot drop keeps its minutes instead of zeroing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A month cell; the post keeps its time of day (midnight when unscheduled)
    Day(Date),
    /// An hour slot in the week or day view; the minutes are kept
    Slot { date: Date, hour: u8 },
    /// An exact timestamp
    Exact(PrimitiveDateTime),
}

impl DropTarget {
    /// Concrete publish time for a post currently at `current`
    pub fn resolve(&self, current: Option<PrimitiveDateTime>) -> PrimitiveDateTime {
        let current_time = current.map(|at| at.time()).unwrap_or(Time::MIDNIGHT);
        match *self {
            DropTarget::Day(date) => date.with_time(current_time),
            DropTarget::Slot { date, hour } => {
                let time = current_time
                    .replace_hour(hour.min(23))
                    .unwrap_or(Time::MIDNIGHT);
                date.with_time(time)
            }
            DropTarget::Exact(at) => at,
        }
    }
}

/// Derives calendar views from the store for a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarProjector {
    reference_date: Date,
    view_mode: ViewMode,
}

impl CalendarProjector {
    pub fn new(reference_date: Date, view_mode: ViewMode) -> Self {
        Self {
            reference_date,
            view_mode,
        }
    }

    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Reference date moved by `delta` units of the current view mode
    pub fn navigate(&self, delta: i32) -> Date {
        shift(self.reference_date, delta, self.view_mode)
    }

    /// Full month containing `reference`
    pub fn month_grid(store: &PostStore, reference: Date) -> MonthGrid {
        let year = reference.year();
        let month = reference.month();
        let first = Date::from_calendar_date(year, month, 1).unwrap_or(reference);
        let days = time::util::days_in_year_month(year, month);
        let leading = first.weekday().number_days_from_sunday() as usize;

        let start = first.midnight();
        let end = first.saturating_add(Duration::days(days as i64)).midnight();
        let posts = store.query_by_date_range(start, end);

        let mut cells: Vec<Option<DayBucket>> = Vec::with_capacity(leading + days as usize);
        cells.extend(std::iter::repeat_n(None, leading));
        for offset in 0..days {
            let date = first.saturating_add(Duration::days(offset as i64));
            cells.push(Some(DayBucket {
                date,
                posts: posts
                    .iter()
                    .filter(|p| p.scheduled_date() == Some(date))
                    .cloned()
                    .collect(),
            }));
        }

        MonthGrid {
            year,
            month: month as u8,
            cells,
        }
    }

    /// Sunday-anchored week containing `reference`, bucketed by hour
    pub fn week_grid(store: &PostStore, reference: Date) -> WeekGrid {
        let start = week_start(reference);
        let posts = store.query_by_date_range(
            start.midnight(),
            start.saturating_add(Duration::days(7)).midnight(),
        );

        let days = (0..7)
            .map(|offset| {
                let date = start.saturating_add(Duration::days(offset));
                hour_buckets(date, &posts)
            })
            .collect();

        WeekGrid { start, days }
    }

    /// The 24 hours of `reference`
    pub fn day_grid(store: &PostStore, reference: Date) -> DayHours {
        let posts = store.query_by_date_range(
            reference.midnight(),
            reference.saturating_add(Duration::days(1)).midnight(),
        );
        hour_buckets(reference, &posts)
    }

    /// Reschedule a dragged post; past targets are rejected like any edit
    pub fn apply_drop(
        store: &mut PostStore,
        id: PostId,
        target: DropTarget,
    ) -> Result<Saved, StoreError> {
        let current = store.get(id).ok_or(StoreError::NotFound(id))?;
        let at = target.resolve(current.scheduled_at());

        tracing::debug!(post_id = %id, target = %at, "Applying drop");
        store.update(id, PostPatch::reschedule(at))
    }
}

fn hour_buckets(date: Date, posts: &[Post]) -> DayHours {
    let hours = (0..24u8)
        .map(|hour| HourBucket {
            hour,
            posts: posts
                .iter()
                .filter(|p| {
                    p.scheduled_at()
                        .is_some_and(|at| at.date() == date && at.hour() == hour)
                })
                .cloned()
                .collect(),
        })
        .collect();
    DayHours { date, hours }
}

/// Sunday on or before `date`
pub fn week_start(date: Date) -> Date {
    let back = date.weekday().number_days_from_sunday();
    date.saturating_sub(Duration::days(back as i64))
}

/// Move `date` by `delta` months, weeks or days.
///
/// Month steps clamp the day to the target month's length. A month step
/// that would leave the representable year range returns `date` unchanged;
/// week and day steps saturate.
pub fn shift(date: Date, delta: i32, unit: ViewMode) -> Date {
    match unit {
        ViewMode::Month => shift_months(date, delta),
        ViewMode::Week => date.saturating_add(Duration::weeks(delta as i64)),
        ViewMode::Day => date.saturating_add(Duration::days(delta as i64)),
    }
}

fn shift_months(date: Date, delta: i32) -> Date {
    let index = i64::from(date.year()) * 12 + (date.month() as i64 - 1) + i64::from(delta);
    let Ok(year) = i32::try_from(index.div_euclid(12)) else {
        return date;
    };
    let month = Month::January.nth_next(index.rem_euclid(12) as u8);
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Platform, PostBody, PostDraft};
    use crate::ports::FixedClock;
    use std::sync::Arc;
    use time::macros::{date, datetime};

    fn store_with(times: &[PrimitiveDateTime]) -> PostStore {
        let mut store = PostStore::new(Arc::new(FixedClock::at(datetime!(2026-09-01 00:00))));
        for (i, at) in times.iter().enumerate() {
            let draft: PostDraft = PostBody::new(format!("Post {}", i + 1), "Body")
                .with_platform(Platform::Linkedin)
                .scheduled_for(*at)
                .into();
            store.add(draft).unwrap();
        }
        store
    }

    #[test]
    fn test_month_starting_wednesday_has_three_blanks() {
        // 1 October 2025 is a Wednesday
        let grid = CalendarProjector::month_grid(&store_with(&[]), date!(2025 - 10 - 15));
        assert_eq!(grid.leading_blanks(), 3);
        assert_eq!(grid.cells.len(), 3 + 31);
        assert_eq!(grid.cells[3].as_ref().unwrap().date, date!(2025 - 10 - 01));
    }

    #[test]
    fn test_month_grid_is_not_padded() {
        // February 2026 starts on a Sunday
        let grid = CalendarProjector::month_grid(&store_with(&[]), date!(2026 - 02 - 10));
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.cells.len(), 28);
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn test_month_grid_buckets_by_calendar_date() {
        let store = store_with(&[
            datetime!(2026-10-18 23:59),
            datetime!(2026-10-18 00:00),
            datetime!(2026-10-19 00:00),
            datetime!(2026-11-01 00:00),
        ]);

        let grid = CalendarProjector::month_grid(&store, date!(2026 - 10 - 01));
        let bucket = grid.bucket(date!(2026 - 10 - 18)).unwrap();
        let titles: Vec<_> = bucket.posts.iter().map(|p| p.body.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 2", "Post 1"]);

        let total: usize = grid.cells.iter().flatten().map(|b| b.posts.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_month_grid_returns_complete_bucket() {
        let store = store_with(&[
            datetime!(2026-10-20 08:00),
            datetime!(2026-10-20 09:00),
            datetime!(2026-10-20 10:00),
            datetime!(2026-10-20 11:00),
            datetime!(2026-10-20 12:00),
        ]);

        let grid = CalendarProjector::month_grid(&store, date!(2026 - 10 - 20));
        let bucket = grid.bucket(date!(2026 - 10 - 20)).unwrap();
        assert_eq!(bucket.posts.len(), 5);
        assert_eq!(bucket.visible(3).len(), 3);
        assert_eq!(bucket.overflow(3), 2);
        assert_eq!(bucket.overflow(10), 0);
    }

    #[test]
    fn test_week_grid_starts_on_sunday() {
        let store = store_with(&[datetime!(2026-10-21 14:30), datetime!(2026-10-25 09:00)]);

        // Wednesday 21 October 2026
        let grid = CalendarProjector::week_grid(&store, date!(2026 - 10 - 21));
        assert_eq!(grid.start, date!(2026 - 10 - 18));
        assert_eq!(grid.days.len(), 7);
        assert_eq!(grid.days[6].date, date!(2026 - 10 - 24));

        let wednesday = &grid.days[3];
        assert_eq!(wednesday.hours.len(), 24);
        assert_eq!(wednesday.hours[14].posts.len(), 1);
        assert_eq!(wednesday.post_count(), 1);

        // The Sunday after belongs to the next week
        let total: usize = grid.days.iter().map(|d| d.post_count()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_day_grid_hours() {
        let store = store_with(&[
            datetime!(2026-10-20 09:45),
            datetime!(2026-10-20 09:05),
            datetime!(2026-10-20 17:00),
        ]);

        let grid = CalendarProjector::day_grid(&store, date!(2026 - 10 - 20));
        assert_eq!(grid.hours.len(), 24);
        let nine: Vec<_> = grid.hours[9].posts.iter().map(|p| p.body.title.as_str()).collect();
        assert_eq!(nine, vec!["Post 2", "Post 1"]);
        assert_eq!(grid.hours[17].posts.len(), 1);
        assert_eq!(grid.post_count(), 3);
    }

    #[test]
    fn test_navigate_by_view_mode() {
        let mut projector = CalendarProjector::new(date!(2026 - 01 - 31), ViewMode::Month);
        assert_eq!(projector.navigate(1), date!(2026 - 02 - 28));
        assert_eq!(projector.navigate(-1), date!(2025 - 12 - 31));
        assert_eq!(projector.navigate(13), date!(2027 - 02 - 28));

        projector.set_view_mode(ViewMode::Week);
        assert_eq!(projector.navigate(1), date!(2026 - 02 - 07));

        projector.set_view_mode(ViewMode::Day);
        assert_eq!(projector.navigate(-31), date!(2025 - 12 - 31));
        assert_eq!(projector.reference_date(), date!(2026 - 01 - 31));
    }

    #[test]
    fn test_navigate_far_out_of_range() {
        let mut projector = CalendarProjector::new(date!(2026 - 10 - 17), ViewMode::Month);
        assert_eq!(projector.navigate(i32::MAX), date!(2026 - 10 - 17));
        assert_eq!(projector.navigate(i32::MIN), date!(2026 - 10 - 17));
        assert_eq!(projector.navigate(-12), date!(2025 - 10 - 17));

        projector.set_view_mode(ViewMode::Week);
        assert_eq!(projector.navigate(i32::MAX), Date::MAX);

        projector.set_view_mode(ViewMode::Day);
        assert_eq!(projector.navigate(i32::MIN), Date::MIN);
    }

    #[test]
    fn test_drop_target_resolution() {
        let current = Some(datetime!(2026-10-20 09:45));
        assert_eq!(
            DropTarget::Day(date!(2026 - 10 - 22)).resolve(current),
            datetime!(2026-10-22 09:45)
        );
        assert_eq!(
            DropTarget::Slot {
                date: date!(2026 - 10 - 22),
                hour: 15
            }
            .resolve(current),
            datetime!(2026-10-22 15:45)
        );
        assert_eq!(
            DropTarget::Day(date!(2026 - 10 - 22)).resolve(None),
            datetime!(2026-10-22 00:00)
        );
    }

    #[test]
    fn test_apply_drop_moves_post_between_buckets() {
        let mut store = store_with(&[datetime!(2026-10-20 09:00)]);

        let target = DropTarget::Day(date!(2026 - 10 - 23));
        let saved = CalendarProjector::apply_drop(&mut store, PostId(1), target).unwrap();
        assert_eq!(saved.post.scheduled_at(), Some(datetime!(2026-10-23 09:00)));

        let grid = CalendarProjector::month_grid(&store, date!(2026 - 10 - 01));
        assert!(grid.bucket(date!(2026 - 10 - 20)).unwrap().posts.is_empty());
        assert_eq!(grid.bucket(date!(2026 - 10 - 23)).unwrap().posts.len(), 1);
    }

    #[test]
    fn test_apply_drop_into_past_leaves_store_unchanged() {
        let mut store = store_with(&[datetime!(2026-10-20 09:00)]);
        let before = store.snapshot();

        let err = CalendarProjector::apply_drop(
            &mut store,
            PostId(1),
            DropTarget::Exact(datetime!(2026-08-01 09:00)),
        )
        .unwrap_err();

        assert!(err.validation().unwrap().is_past_schedule());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_apply_drop_unknown_post() {
        let mut store = store_with(&[]);
        let target = DropTarget::Day(date!(2026 - 10 - 23));
        let err = CalendarProjector::apply_drop(&mut store, PostId(5), target).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(PostId(5))));
    }
}
