use anyhow::{Context, Result};
use indicatif::MultiProgress;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::args::ConsoleOptions;
use albumdl_core::{
    config::Config,
    console::{self, Console},
    downloader::YtDlpDownloader,
    resolver::SpotdlResolver,
};

pub async fn run(
    options: &ConsoleOptions,
    config_path: Option<&Path>,
    progress: MultiProgress,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let mut settings = config.settings.clone();
    options.apply_to(&mut settings);

    let resolver = SpotdlResolver::new(config.spotdl_path()?);
    let downloader = YtDlpDownloader::new(config.yt_dlp_path()?, progress);

    let stop = Console::new(&resolver, &downloader)
        .run(
            &mut settings,
            console::spawn_stdin_reader(),
            &mut io::stdout(),
            console::ctrl_c(),
        )
        .await
        .context("Console session failed")?;

    debug!("Console stopped: {:?}", stop);
    Ok(())
}
