//! Optimal command - next suggested posting slot

use anyhow::Result;
use contentflow_domain::usecases::optimal::{best_slot, next_optimal_slot};

use crate::args::OptimalArgs;
use crate::render;
use crate::session::{GlobalOpts, Session};

pub async fn execute(args: OptimalArgs, opts: &GlobalOpts) -> Result<()> {
    let session = Session::open(opts).await?;

    let Some(slot) = next_optimal_slot(&args.platform, session.now()) else {
        anyhow::bail!("No posting-time data for {}", args.platform);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&slot)?);
    } else {
        println!(
            "Next best time for {}: {} (engagement {}%)",
            slot.platform,
            render::when(Some(slot.at)),
            slot.engagement
        );
        if let Some(best) = best_slot(&args.platform) {
            println!(
                "Best slot of the week: {:?} {:02}:00 ({}%)",
                best.day, best.hour, best.engagement
            );
        }
    }

    Ok(())
}
