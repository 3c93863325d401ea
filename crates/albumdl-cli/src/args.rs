use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use albumdl_core::settings::{AudioFormat, Settings};

#[derive(Parser)]
#[command(name = "albumdl")]
#[command(author, version, about = "Interactive console for downloading Spotify albums")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Console options when no subcommand is given
    #[command(flatten)]
    pub console: ConsoleOptions,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read album URLs from stdin and download them (default)
    Console {
        #[command(flatten)]
        options: ConsoleOptions,
    },

    /// Check that external tools are installed
    Doctor,

    /// Show configuration
    Config,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct ConsoleOptions {
    /// Organize downloads as artist/album/title
    #[arg(short, long)]
    pub structured: bool,

    /// Replace spaces with hyphens in file names
    #[arg(short, long)]
    pub replace_spaces: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output path template, e.g. "{artists} - {title}.{output-ext}"
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum concurrent downloads per album
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Re-download files that already exist
    #[arg(long)]
    pub overwrite: bool,
}

impl ConsoleOptions {
    /// Layer the command line over the loaded settings
    pub fn apply_to(&self, settings: &mut Settings) {
        settings.structured |= self.structured;
        settings.replace_spaces |= self.replace_spaces;
        settings.overwrite |= self.overwrite;
        if let Some(format) = self.format {
            settings.format = format.into();
        }
        if let Some(ref output) = self.output {
            settings.output = output.clone();
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// MP3 - Lossy, widely compatible
    Mp3,
    /// FLAC - Lossless compression
    Flac,
    /// Ogg Vorbis - Lossy, open format
    Ogg,
    /// Opus - Lossy, best quality/size ratio
    Opus,
    /// M4A - AAC in an MP4 container
    M4a,
    /// WAV - Uncompressed PCM
    Wav,
}

impl From<OutputFormat> for AudioFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Mp3 => AudioFormat::Mp3,
            OutputFormat::Flac => AudioFormat::Flac,
            OutputFormat::Ogg => AudioFormat::Ogg,
            OutputFormat::Opus => AudioFormat::Opus,
            OutputFormat::M4a => AudioFormat::M4a,
            OutputFormat::Wav => AudioFormat::Wav,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_runs_console_options() {
        let cli = Cli::parse_from(["albumdl", "-sr", "-f", "flac"]);
        assert!(cli.command.is_none());
        assert!(cli.console.structured);
        assert!(cli.console.replace_spaces);
        assert_eq!(cli.console.format, Some(OutputFormat::Flac));
    }

    #[test]
    fn test_console_subcommand() {
        let cli = Cli::parse_from(["albumdl", "console", "-s", "-t", "2", "-v"]);
        match cli.command {
            Some(Commands::Console { options }) => {
                assert!(options.structured);
                assert!(!options.replace_spaces);
                assert_eq!(options.threads, Some(2));
            }
            _ => panic!("expected console subcommand"),
        }
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_options_layer_over_settings() {
        let mut settings = Settings {
            replace_spaces: true,
            ..Settings::default()
        };
        let options = ConsoleOptions {
            structured: true,
            output: Some("{title}".to_string()),
            format: Some(OutputFormat::Opus),
            ..ConsoleOptions::default()
        };
        options.apply_to(&mut settings);

        assert!(settings.structured);
        // flags only switch options on
        assert!(settings.replace_spaces);
        assert_eq!(settings.output, "{title}");
        assert_eq!(settings.format, AudioFormat::Opus);
        assert_eq!(settings.threads, 4);
    }
}
