//! Occurrences command - expand a recurring post into publish times

use anyhow::Result;
use contentflow_domain::{StoreError, usecases::recurrence, wall_clock};
use time::{Date, Duration};

use crate::args::OccurrencesArgs;
use crate::render;
use crate::session::{GlobalOpts, Session};

const DEFAULT_WINDOW_DAYS: i64 = 90;

pub async fn execute(args: OccurrencesArgs, opts: &GlobalOpts) -> Result<()> {
    let session = Session::open(opts).await?;

    let post = session
        .service
        .store()
        .get(args.id)
        .ok_or(StoreError::NotFound(args.id))?;

    let start = args.from.map(Date::midnight).unwrap_or_else(|| session.now());
    let end = match args.until {
        Some(until) => until.midnight(),
        None => start
            .checked_add(Duration::days(DEFAULT_WINDOW_DAYS))
            .unwrap_or(Date::MAX.midnight()),
    };
    if end <= start {
        anyhow::bail!("--until must be after the start of the window");
    }

    let found = recurrence::occurrences(&post.body, start, end, args.limit);

    if args.json {
        let times = found
            .iter()
            .map(wall_clock::format)
            .collect::<Result<Vec<_>, _>>()?;
        let output = serde_json::json!({
            "id": post.id,
            "rule": post.body.recurrence_rule,
            "occurrences": times,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("#{} {} ({})", post.id, post.body.title, found.len());
        if found.is_empty() {
            println!("  (none)");
        }
        for at in &found {
            println!("  {} {}", render::when(Some(*at)), at.weekday());
        }
    }

    Ok(())
}
