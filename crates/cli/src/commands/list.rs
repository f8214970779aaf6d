//! Upcoming and recent post lists

use anyhow::Result;

use crate::args::{RecentArgs, UpcomingArgs};
use crate::render;
use crate::session::{GlobalOpts, Session};

pub async fn upcoming(args: UpcomingArgs, opts: &GlobalOpts) -> Result<()> {
    let session = Session::open(opts).await?;
    let posts = session.service.upcoming();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else {
        print!("{}", render::post_list("Upcoming posts", &posts));
    }

    Ok(())
}

pub async fn recent(args: RecentArgs, opts: &GlobalOpts) -> Result<()> {
    let session = Session::open(opts).await?;
    let posts = session.service.recent(args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else {
        print!("{}", render::post_list("Recent posts", &posts));
    }

    Ok(())
}
