//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use contentflow_domain::{
    DayOfWeek, Platform, PostId, Priority, RecurrenceRule, calendar_date, usecases::ViewMode,
    wall_clock,
};
use std::path::PathBuf;
use time::{Date, PrimitiveDateTime};

/// contentflow: schedule social posts and browse them on a calendar
#[derive(Parser, Debug)]
#[command(name = "contentflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// JSON file of posts to load (built-in sample posts when absent)
    #[arg(long, global = true)]
    pub posts: Option<PathBuf>,

    /// Pretend the current time is YYYY-MM-DDTHH:MM
    #[arg(long, global = true, value_parser = parse_date_time)]
    pub now: Option<PrimitiveDateTime>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show posts on a month, week or day calendar
    Calendar(CalendarArgs),

    /// List posts that are still to be published
    Upcoming(UpcomingArgs),

    /// List the most recent past posts
    Recent(RecentArgs),

    /// Validate and schedule a new post
    Schedule(ScheduleArgs),

    /// Resubmit every field of an existing post
    Edit(EditArgs),

    /// Move a post to another day or hour
    Reschedule(RescheduleArgs),

    /// List the publish times a recurring post expands to
    Occurrences(OccurrencesArgs),

    /// Suggest the next best time to post on a platform
    Optimal(OptimalArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// View to render (month, week, day); defaults to calendar.default_view
    pub view: Option<ViewMode>,

    /// Reference date, YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<Date>,

    /// Move the window by this many months, weeks or days
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpcomingArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RecentArgs {
    /// Maximum number of posts (defaults to scheduling.recent_limit)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub content: String,

    /// Target platform; repeat for several
    #[arg(long = "platform")]
    pub platforms: Vec<Platform>,

    /// Publish date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub date: String,

    /// Publish time, HH:MM
    #[arg(long, default_value = "")]
    pub time: String,

    /// Display timezone label (defaults to general.default_timezone)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Repeat the post (daily, weekly, monthly, custom)
    #[arg(long)]
    pub recurring: Option<RecurrenceRule>,

    /// Weekday for custom recurrence; repeat for several
    #[arg(long = "day")]
    pub days: Vec<DayOfWeek>,

    /// Last day of the recurrence, YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub end_date: String,

    /// Priority (defaults to scheduling.default_priority)
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Tag; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Save as a draft without scheduling checks
    #[arg(long)]
    pub draft: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Post to edit
    #[arg(long)]
    pub id: PostId,

    #[command(flatten)]
    pub form: ScheduleArgs,
}

#[derive(Args, Debug)]
pub struct RescheduleArgs {
    /// Post to move
    #[arg(long)]
    pub id: PostId,

    /// Target day, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: Date,

    /// Target hour (0-23); keeps the post's time of day when absent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..24))]
    pub hour: Option<u8>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OccurrencesArgs {
    #[arg(long)]
    pub id: PostId,

    /// First day of the window, YYYY-MM-DD (defaults to now)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<Date>,

    /// Day the window ends, exclusive, YYYY-MM-DD (defaults to 90 days later)
    #[arg(long, value_parser = parse_date)]
    pub until: Option<Date>,

    /// Maximum number of publish times
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OptimalArgs {
    #[arg(long)]
    pub platform: Platform,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./contentflow.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

fn parse_date(s: &str) -> Result<Date, String> {
    calendar_date::parse(s.trim()).map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_date_time(s: &str) -> Result<PrimitiveDateTime, String> {
    wall_clock::parse(s.trim()).map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {}", e))
}
