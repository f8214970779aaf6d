//! Command implementations

pub mod calendar;
pub mod config;
pub mod list;
pub mod occurrences;
pub mod optimal;
pub mod reschedule;
pub mod schedule;
