//! Calendar command - month, week and day views

use anyhow::{Context, Result};
use contentflow_domain::usecases::{CalendarProjector, ViewMode};

use crate::args::CalendarArgs;
use crate::render;
use crate::session::{GlobalOpts, Session};

pub async fn execute(args: CalendarArgs, opts: &GlobalOpts) -> Result<()> {
    let session = Session::open(opts).await?;

    let view = match args.view {
        Some(view) => view,
        None => session
            .config
            .calendar
            .default_view
            .parse::<ViewMode>()
            .map_err(anyhow::Error::msg)
            .context("Invalid calendar.default_view")?,
    };

    let projector = CalendarProjector::new(args.date.unwrap_or_else(|| session.today()), view);
    let reference = projector.navigate(args.offset);
    let store = session.service.store();

    tracing::debug!(view = %view, reference = %reference, "Rendering calendar");

    match view {
        ViewMode::Month => {
            let grid = CalendarProjector::month_grid(store, reference);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!(
                    "{}",
                    render::month(&grid, session.config.calendar.max_visible_per_day)
                );
            }
        }
        ViewMode::Week => {
            let grid = CalendarProjector::week_grid(store, reference);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render::week(&grid));
            }
        }
        ViewMode::Day => {
            let day = CalendarProjector::day_grid(store, reference);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&day)?);
            } else {
                print!("{}", render::day_hours(&day));
            }
        }
    }

    Ok(())
}
