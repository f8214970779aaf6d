//! Reschedule command - the drag-and-drop equivalent

use anyhow::Result;
use contentflow_domain::usecases::{CalendarProjector, DropTarget};

use crate::args::RescheduleArgs;
use crate::render;
use crate::session::{GlobalOpts, Session};

pub async fn execute(args: RescheduleArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(opts).await?;

    let target = match args.hour {
        Some(hour) => DropTarget::Slot {
            date: args.date,
            hour,
        },
        None => DropTarget::Day(args.date),
    };

    let saved = CalendarProjector::apply_drop(session.service.store_mut(), args.id, target)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&saved.post)?);
    } else {
        println!(
            "Moved post #{} to {}",
            saved.post.id,
            render::when(saved.post.scheduled_at())
        );
    }

    Ok(())
}
