//! Interactive console: reads URLs line by line and downloads albums

use crate::downloader::SongDownloader;
use crate::error::Result;
use crate::overrides::SessionOverrides;
use crate::resolver::{ResolveOptions, SongResolver};
use crate::settings::Settings;
use std::future::Future;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub const PROMPT: &str = "> ";

const FAREWELL: &str = "\nExiting console mode.";

/// What a single line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Exit,
    Help,
    /// A Spotify album link
    Album(String),
    /// Anything else
    Unsupported(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        match line.to_lowercase().as_str() {
            "exit" | "quit" => Command::Exit,
            "help" => Command::Help,
            _ if is_album_url(line) => Command::Album(line.to_string()),
            _ => Command::Unsupported(line.to_string()),
        }
    }
}

/// Validate that a string looks like a Spotify album URL
pub fn is_album_url(url: &str) -> bool {
    url.contains("album") && url.contains("open.spotify.com")
}

/// Why a session ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    ExitCommand,
    EndOfInput,
    Interrupted,
}

pub struct Console<'a, R, D> {
    resolver: &'a R,
    downloader: &'a D,
}

impl<'a, R: SongResolver, D: SongDownloader> Console<'a, R, D> {
    pub fn new(resolver: &'a R, downloader: &'a D) -> Self {
        Self {
            resolver,
            downloader,
        }
    }

    /// Run a session until `exit`, end of input, or `interrupt` resolves.
    ///
    /// The settings overrides live for exactly this call: they are reverted
    /// before it returns, including when a resolution or download error ends
    /// the session early.
    pub async fn run<W, F>(
        &self,
        settings: &mut Settings,
        mut lines: mpsc::Receiver<io::Result<String>>,
        out: &mut W,
        interrupt: F,
    ) -> Result<StopReason>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        let settings = SessionOverrides::apply(settings);
        write_banner(out, &settings)?;

        tokio::pin!(interrupt);

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let next = tokio::select! {
                biased;
                _ = &mut interrupt => None,
                line = lines.recv() => Some(line),
            };

            let line = match next {
                None => {
                    writeln!(out, "{}", FAREWELL)?;
                    return Ok(StopReason::Interrupted);
                }
                Some(None) => {
                    writeln!(out, "{}", FAREWELL)?;
                    return Ok(StopReason::EndOfInput);
                }
                Some(Some(line)) => line?,
            };

            let command = Command::parse(&line);
            if command == Command::Empty {
                continue;
            }

            writeln!(out, "Input: {}", line.trim())?;

            match command {
                Command::Empty => {}
                Command::Exit => return Ok(StopReason::ExitCommand),
                Command::Help => write_help(out, &settings)?,
                Command::Album(url) => self.download_album(&url, &settings).await?,
                Command::Unsupported(_) => {
                    error!("Currently only supporting Spotify album links");
                }
            }
        }
    }

    async fn download_album(&self, url: &str, settings: &Settings) -> Result<()> {
        info!("Processing album: {}", url);

        let songs = self
            .resolver
            .resolve(&[url.to_string()], &ResolveOptions::from(settings))
            .await?;

        let report = self
            .downloader
            .download_many(&songs, settings, settings.space_replacer)
            .await?;

        if report.failed.is_empty() {
            info!(
                "Album complete: {} of {} downloaded, {} skipped",
                report.downloaded.len(),
                report.total(),
                report.skipped.len()
            );
        } else {
            warn!(
                "Album finished with errors: {} of {} downloaded, {} skipped, {} failed",
                report.downloaded.len(),
                report.total(),
                report.skipped.len(),
                report.failed.len()
            );
        }

        Ok(())
    }
}

fn write_banner<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    writeln!(
        out,
        "Welcome to albumdl console. Enter Spotify URLs to download (Ctrl+D to exit)."
    )?;
    writeln!(out, "Currently supporting album links only.")?;
    writeln!(out, "Type 'help' to see available commands.")?;

    let mut options = Vec::new();
    if settings.structured {
        options.push("-s (artist/album structure)");
    }
    if settings.replace_spaces {
        options.push("-r (replace spaces)");
    }
    if !options.is_empty() {
        writeln!(out, "Active options: {}", options.join(", "))?;
    }
    Ok(())
}

fn write_help<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    let structure = if settings.structured {
        "artist/album"
    } else {
        "default"
    };
    let spaces = if settings.replace_spaces {
        "hyphens"
    } else {
        "none"
    };

    writeln!(out, "\nAvailable commands:")?;
    writeln!(out, "  help             Show this help message")?;
    writeln!(out, "  exit, quit       Exit the console")?;
    writeln!(out, "  <spotify-url>    Download from the given Spotify album URL")?;
    writeln!(out, "\nCurrent settings:")?;
    writeln!(out, "  Output folder structure: {}", structure)?;
    writeln!(out, "  Space replacement: {}", spaces)?;
    writeln!(out, "  Output format: {}", settings.format)?;
    writeln!(out, "\nUsage examples:")?;
    writeln!(out, "  albumdl console -s     # Use artist/album folder structure")?;
    writeln!(out, "  albumdl console -r     # Replace spaces with hyphens")?;
    writeln!(out, "  albumdl console -sr    # Use both options together")?;
    Ok(())
}

/// Forward stdin lines over a channel from a dedicated thread.
///
/// A blocked terminal read never holds up the loop, so an interrupt can end
/// the session while the reader is still waiting.
pub fn spawn_stdin_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Resolves on Ctrl+C; never resolves if the signal can't be watched
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_control_commands() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("Exit"), Command::Exit);
        assert_eq!(Command::parse("  QUIT \n"), Command::Exit);
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse("help me"), Command::Unsupported("help me".to_string()));
    }

    #[test]
    fn test_parse_urls() {
        assert_eq!(
            Command::parse(" https://open.spotify.com/album/xyz "),
            Command::Album("https://open.spotify.com/album/xyz".to_string())
        );
        assert_eq!(
            Command::parse("https://open.spotify.com/track/xyz"),
            Command::Unsupported("https://open.spotify.com/track/xyz".to_string())
        );
        assert!(!is_album_url("https://example.com/album/xyz"));
    }

    #[test]
    fn test_banner_lists_active_options() {
        let settings = Settings {
            structured: true,
            replace_spaces: true,
            ..Settings::default()
        };
        let mut out = Vec::new();
        write_banner(&mut out, &settings).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Active options: -s (artist/album structure), -r (replace spaces)"));

        let mut out = Vec::new();
        write_banner(&mut out, &Settings::default()).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("Active options"));
    }

    #[test]
    fn test_help_reports_settings() {
        let mut out = Vec::new();
        write_help(&mut out, &Settings::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  Output folder structure: default\n"));
        assert!(text.contains("  Space replacement: none\n"));
        assert!(text.contains("  Output format: mp3\n"));
    }
}
