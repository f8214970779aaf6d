//! Plain-text rendering of posts and calendar views

use contentflow_domain::{
    Post,
    usecases::calendar::{DayHours, MonthGrid, WeekGrid},
};
use std::fmt::Write;
use time::{Month, PrimitiveDateTime};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn when(at: Option<PrimitiveDateTime>) -> String {
    match at {
        Some(at) => format!("{} {:02}:{:02}", at.date(), at.hour(), at.minute()),
        None => "unscheduled".to_string(),
    }
}

fn platforms(post: &Post) -> String {
    post.body
        .platforms
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary: id, time, status, title, platforms
pub fn post_line(post: &Post) -> String {
    format!(
        "#{:<4} {:<16}  {:<9}  {}  ({})",
        post.id,
        when(post.scheduled_at()),
        post.status.as_str(),
        post.body.title,
        platforms(post)
    )
}

pub fn post_list(title: &str, posts: &[Post]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", title, posts.len());
    if posts.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for post in posts {
        let _ = writeln!(out, "  {}", post_line(post));
    }
    out
}

/// Month grid with a per-day listing truncated to `cap` posts
pub fn month(grid: &MonthGrid, cap: usize) -> String {
    let mut out = String::new();
    let name = Month::try_from(grid.month)
        .map(|m| m.to_string())
        .unwrap_or_else(|_| grid.month.to_string());
    let _ = writeln!(out, "{} {}", name, grid.year);
    let _ = writeln!(out, "{}", WEEKDAYS.map(|d| format!("{:>4}", d)).concat());

    for row in grid.rows() {
        let mut line = String::new();
        for cell in row {
            match cell {
                Some(bucket) => {
                    let mark = if bucket.posts.is_empty() { ' ' } else { '*' };
                    let _ = write!(line, "{:>3}{}", bucket.date.day(), mark);
                }
                None => line.push_str("    "),
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    for bucket in grid.cells.iter().flatten().filter(|b| !b.posts.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}",
            WEEKDAYS[bucket.date.weekday().number_days_from_sunday() as usize],
            bucket.date
        );
        for post in bucket.visible(cap) {
            let _ = writeln!(out, "  {}", post_line(post));
        }
        let hidden = bucket.overflow(cap);
        if hidden > 0 {
            let _ = writeln!(out, "  +{} more", hidden);
        }
    }

    out
}

pub fn week(grid: &WeekGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Week of {}", grid.start);
    for day in &grid.days {
        let _ = writeln!(out);
        out.push_str(&day_hours(day));
    }
    out
}

/// A day's occupied hours; empty hours are omitted
pub fn day_hours(day: &DayHours) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({} posts)",
        WEEKDAYS[day.date.weekday().number_days_from_sunday() as usize],
        day.date,
        day.post_count()
    );
    for bucket in day.hours.iter().filter(|h| !h.posts.is_empty()) {
        for post in &bucket.posts {
            let _ = writeln!(out, "  {:02}:00  {}", bucket.hour, post_line(post));
        }
    }
    out
}
