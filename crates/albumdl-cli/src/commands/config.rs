use anyhow::Result;
use std::path::Path;
use albumdl_core::config::{self, Config};

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("albumdl configuration\n");

    match config.spotdl_path() {
        Ok(p) => println!("# spotdl: {}", p.display()),
        Err(_) => println!("# spotdl: not found"),
    }
    match config.yt_dlp_path() {
        Ok(p) => println!("# yt-dlp: {}", p.display()),
        Err(_) => println!("# yt-dlp: not found"),
    }
    println!();
    print!("{}", config.to_toml()?);

    // Show config file locations
    println!("\nConfig file locations (in priority order):");
    if let Some(p) = config_path {
        println!("  1. {} (specified)", p.display());
    }
    if let Some(default) = config::default_config_file() {
        println!("  2. {}", default.display());
    }
    println!("  3. Environment variables (ALBUMDL_*, nested keys split on __)");

    Ok(())
}
