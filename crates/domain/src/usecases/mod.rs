//! Application use cases / business logic

pub mod calendar;
pub mod optimal;
pub mod recurrence;
pub mod scheduling;

pub use calendar::{CalendarProjector, DropTarget, MonthGrid, ViewMode, WeekGrid};
pub use scheduling::{SchedulingConfig, SchedulingService};
