//! Suggested posting slots per platform

use serde::Serialize;
use time::{Duration, PrimitiveDateTime};

use crate::model::DayOfWeek::{Friday, Monday, Saturday, Sunday, Thursday, Tuesday, Wednesday};
use crate::model::{DayOfWeek, Platform, wall_clock};

/// Best hour to post on a given weekday, with its expected engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotEntry {
    pub day: DayOfWeek,
    pub hour: u8,
    /// Relative engagement score, 0-100
    pub engagement: u8,
}

const fn slot(day: DayOfWeek, hour: u8, engagement: u8) -> SlotEntry {
    SlotEntry {
        day,
        hour,
        engagement,
    }
}

const INSTAGRAM: [SlotEntry; 7] = [
    slot(Monday, 11, 92),
    slot(Tuesday, 14, 89),
    slot(Wednesday, 17, 94),
    slot(Thursday, 11, 87),
    slot(Friday, 13, 91),
    slot(Saturday, 10, 96),
    slot(Sunday, 9, 88),
];

const LINKEDIN: [SlotEntry; 7] = [
    slot(Monday, 8, 94),
    slot(Tuesday, 9, 96),
    slot(Wednesday, 8, 93),
    slot(Thursday, 9, 97),
    slot(Friday, 8, 89),
    slot(Saturday, 10, 76),
    slot(Sunday, 19, 71),
];

const TWITTER: [SlotEntry; 7] = [
    slot(Monday, 9, 88),
    slot(Tuesday, 9, 91),
    slot(Wednesday, 9, 89),
    slot(Thursday, 9, 93),
    slot(Friday, 9, 87),
    slot(Saturday, 10, 84),
    slot(Sunday, 20, 86),
];

const FACEBOOK: [SlotEntry; 7] = [
    slot(Monday, 15, 85),
    slot(Tuesday, 15, 87),
    slot(Wednesday, 15, 89),
    slot(Thursday, 15, 91),
    slot(Friday, 13, 88),
    slot(Saturday, 12, 92),
    slot(Sunday, 13, 90),
];

/// Weekly slot table for a platform, if one is known
pub fn slots_for(platform: &Platform) -> Option<&'static [SlotEntry]> {
    match platform {
        Platform::Instagram => Some(&INSTAGRAM),
        Platform::Linkedin => Some(&LINKEDIN),
        Platform::Twitter => Some(&TWITTER),
        Platform::Facebook => Some(&FACEBOOK),
        _ => None,
    }
}

/// A concrete upcoming slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimalSlot {
    pub platform: Platform,
    #[serde(with = "wall_clock")]
    pub at: PrimitiveDateTime,
    pub engagement: u8,
}

/// First table slot strictly after `now`, looking one week ahead
pub fn next_optimal_slot(platform: &Platform, now: PrimitiveDateTime) -> Option<OptimalSlot> {
    let table = slots_for(platform)?;

    (0..=7).find_map(|offset| {
        let date = now.date().checked_add(Duration::days(offset))?;
        let entry = table
            .iter()
            .find(|e| e.day == DayOfWeek::from(date.weekday()))?;
        let at = date.with_hms(entry.hour, 0, 0).ok()?;
        (at > now).then(|| OptimalSlot {
            platform: platform.clone(),
            at,
            engagement: entry.engagement,
        })
    })
}

/// Highest-engagement weekday slot for a platform
pub fn best_slot(platform: &Platform) -> Option<SlotEntry> {
    slots_for(platform)?
        .iter()
        .copied()
        .max_by_key(|e| e.engagement)
}
