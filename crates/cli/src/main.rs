//! contentflow CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;
mod render;
mod session;

use args::{Cli, Commands};
use config::AppConfig;
use session::GlobalOpts;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.log_level.clone() {
        Some(level) => level,
        None => AppConfig::load(cli.config.as_deref())
            .unwrap_or_default()
            .general
            .log_level,
    };
    init_logging(&log_level)?;

    let opts = GlobalOpts {
        config: cli.config,
        posts: cli.posts,
        now: cli.now,
    };

    // Execute command
    match cli.command {
        Commands::Calendar(args) => commands::calendar::execute(args, &opts).await,
        Commands::Upcoming(args) => commands::list::upcoming(args, &opts).await,
        Commands::Recent(args) => commands::list::recent(args, &opts).await,
        Commands::Schedule(args) => commands::schedule::execute(args, &opts).await,
        Commands::Edit(args) => commands::schedule::edit(args, &opts).await,
        Commands::Reschedule(args) => commands::reschedule::execute(args, &opts).await,
        Commands::Occurrences(args) => commands::occurrences::execute(args, &opts).await,
        Commands::Optimal(args) => commands::optimal::execute(args, &opts).await,
        Commands::Config(args) => commands::config::execute(args, opts.config).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
