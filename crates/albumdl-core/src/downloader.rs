//! Song downloads: the single-song entry point and the batch built on it

use crate::error::DownloadError;
use crate::settings::{AudioFormat, PathTransform, Settings};
use crate::song::Song;
use crate::template;
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Outcome of one `download_many` call
#[derive(Debug, Default)]
pub struct BatchReport {
    pub downloaded: Vec<PathBuf>,
    /// Destinations that already existed
    pub skipped: Vec<PathBuf>,
    /// Display name and error of every song that failed
    pub failed: Vec<(String, DownloadError)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.downloaded.len() + self.skipped.len() + self.failed.len()
    }
}

enum SongOutcome {
    Downloaded(PathBuf),
    Skipped(PathBuf),
    Failed(String, DownloadError),
}

#[allow(async_fn_in_trait)]
pub trait SongDownloader {
    /// Download a single song to `file_path`, returning the written file
    async fn download_one(
        &self,
        song: &Song,
        file_path: &Path,
        settings: &Settings,
    ) -> Result<PathBuf, DownloadError>;

    /// Download every song, rendering each destination from `settings.output`.
    ///
    /// `path_transform` rewrites each rendered destination before it reaches
    /// `download_one`, for this batch only. Up to `settings.threads` songs are
    /// in flight at once. Per-song failures land in the report; a fatal error
    /// aborts the batch.
    async fn download_many(
        &self,
        songs: &[Song],
        settings: &Settings,
        path_transform: Option<PathTransform>,
    ) -> Result<BatchReport, DownloadError> {
        info!("Downloading {} song(s)", songs.len());

        let mut outcomes = stream::iter(songs)
            .map(|song| async move {
                let mut rendered = template::render(&settings.output, song, settings.format);
                if let Some(transform) = path_transform {
                    rendered = transform.apply(&rendered);
                }
                let path = PathBuf::from(rendered);

                if !settings.overwrite && path.exists() {
                    debug!("Skipping existing file: {}", path.display());
                    return SongOutcome::Skipped(path);
                }

                match self.download_one(song, &path, settings).await {
                    Ok(written) => SongOutcome::Downloaded(written),
                    Err(e) => SongOutcome::Failed(song.display_name(), e),
                }
            })
            .buffer_unordered(settings.threads.max(1));

        let mut report = BatchReport::default();
        while let Some(outcome) = outcomes.next().await {
            match outcome {
                SongOutcome::Downloaded(path) => report.downloaded.push(path),
                SongOutcome::Skipped(path) => report.skipped.push(path),
                SongOutcome::Failed(_, e) if e.is_fatal() => return Err(e),
                SongOutcome::Failed(name, e) => {
                    warn!("Failed to download {}: {}", name, e);
                    report.failed.push((name, e));
                }
            }
        }

        Ok(report)
    }
}

/// Downloader that searches and extracts audio with yt-dlp
#[derive(Debug)]
pub struct YtDlpDownloader {
    yt_dlp_path: PathBuf,
    progress: MultiProgress,
}

impl YtDlpDownloader {
    /// Spinners are added to `progress`, which the caller may share with its log writer
    pub fn new(yt_dlp_path: PathBuf, progress: MultiProgress) -> Self {
        Self {
            yt_dlp_path,
            progress,
        }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        let pb = self.progress.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyle::default_spinner().tick_chars("=>-"));
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl SongDownloader for YtDlpDownloader {
    async fn download_one(
        &self,
        song: &Song,
        file_path: &Path,
        settings: &Settings,
    ) -> Result<PathBuf, DownloadError> {
        info!("Downloading: {}", song.display_name());

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let source = song
            .download_url
            .clone()
            .unwrap_or_else(|| search_query(song));

        // yt-dlp picks the final extension itself
        let mut output_template: OsString = file_path.with_extension("").into_os_string();
        output_template.push(".%(ext)s");

        let pb = self.spinner(song.display_name());

        let output = Command::new(&self.yt_dlp_path)
            .args(yt_dlp_args(settings, output_template, &source))
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DownloadError::YtDlpNotFound,
                _ => DownloadError::Io(e),
            });

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                pb.abandon_with_message(format!("Failed: {}", song.display_name()));
                return Err(e);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp stderr: {}", stderr);
            pb.abandon_with_message(format!("Failed: {}", song.display_name()));

            if stderr.contains("Video unavailable") || stderr.contains("Private video") {
                return Err(DownloadError::Unavailable(source));
            }
            return Err(DownloadError::YtDlpFailed(output.status.code()));
        }

        pb.finish_with_message(format!("Done: {}", file_path.display()));
        Ok(file_path.to_path_buf())
    }
}

/// YouTube search query for a song without a matched media URL
pub fn search_query(song: &Song) -> String {
    format!("ytsearch1:{} - {}", song.joined_artists(), song.name)
}

/// Arguments for one yt-dlp extraction into `output_template`
fn yt_dlp_args(settings: &Settings, output_template: OsString, source: &str) -> Vec<OsString> {
    // writes go straight to the final destination
    let overwrite = if settings.overwrite {
        "--force-overwrites"
    } else {
        "--no-overwrites"
    };

    let mut args: Vec<OsString> = [
        "--extract-audio",
        "--audio-format",
        yt_dlp_audio_format(settings.format),
        "--no-playlist",
        "--no-progress",
        overwrite,
        "-o",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(output_template);
    args.push(source.into());
    args
}

fn yt_dlp_audio_format(format: AudioFormat) -> &'static str {
    match format {
        AudioFormat::Mp3 => "mp3",
        AudioFormat::Flac => "flac",
        AudioFormat::Ogg => "vorbis",
        AudioFormat::Opus => "opus",
        AudioFormat::M4a => "m4a",
        AudioFormat::Wav => "wav",
    }
}
