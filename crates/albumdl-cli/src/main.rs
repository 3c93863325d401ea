mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use std::io;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};
use logging::SuspendingMakeWriter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "albumdl=info,albumdl_core=info",
        1 => "albumdl=debug,albumdl_core=debug",
        2 => "albumdl=trace,albumdl_core=trace",
        _ => "trace",
    };

    // Spinners draw on stderr; log lines pause them so the two never interleave
    let progress = MultiProgress::new();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(SuspendingMakeWriter::new(progress.clone(), io::stdout)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Some(Commands::Console { options }) => {
            commands::console::run(&options, cli.config.as_deref(), progress).await
        }
        Some(Commands::Doctor) => commands::doctor::run().await,
        Some(Commands::Config) => commands::config::run(cli.config.as_deref()).await,
        None => commands::console::run(&cli.console, cli.config.as_deref(), progress).await,
    }
}
