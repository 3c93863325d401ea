//! Song resolution: turning Spotify URLs into song records

use crate::error::ResolveError;
use crate::settings::{AlbumType, Settings};
use crate::song::Song;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Resolution flags taken from the session settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub use_ytm_data: bool,
    pub playlist_numbering: bool,
    pub albums_to_ignore: Vec<String>,
    pub album_type: Option<AlbumType>,
    pub playlist_retain_track_cover: bool,
}

impl From<&Settings> for ResolveOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            use_ytm_data: settings.ytm_data,
            playlist_numbering: settings.playlist_numbering,
            albums_to_ignore: settings.ignore_albums.clone(),
            album_type: settings.album_type,
            playlist_retain_track_cover: settings.playlist_retain_track_cover,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait SongResolver {
    /// Resolve `urls` into an ordered list of songs
    async fn resolve(
        &self,
        urls: &[String],
        options: &ResolveOptions,
    ) -> Result<Vec<Song>, ResolveError>;
}

/// Resolver backed by `spotdl save`
#[derive(Debug)]
pub struct SpotdlResolver {
    spotdl_path: PathBuf,
}

impl SpotdlResolver {
    pub fn new(spotdl_path: PathBuf) -> Self {
        Self { spotdl_path }
    }

    fn save_args(urls: &[String], options: &ResolveOptions, save_file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["save".into()];
        args.extend(urls.iter().map(OsString::from));
        args.push("--save-file".into());
        args.push(save_file.as_os_str().to_owned());

        if options.use_ytm_data {
            args.push("--ytm-data".into());
        }
        if options.playlist_numbering {
            args.push("--playlist-numbering".into());
        }
        if !options.albums_to_ignore.is_empty() {
            args.push("--ignore-albums".into());
            args.extend(options.albums_to_ignore.iter().map(OsString::from));
        }
        if let Some(album_type) = options.album_type {
            args.push("--album-type".into());
            args.push(album_type.to_string().into());
        }
        if options.playlist_retain_track_cover {
            args.push("--playlist-retain-track-cover".into());
        }

        args
    }
}

impl SongResolver for SpotdlResolver {
    async fn resolve(
        &self,
        urls: &[String],
        options: &ResolveOptions,
    ) -> Result<Vec<Song>, ResolveError> {
        info!("Resolving {} URL(s)", urls.len());

        let temp_dir = tempfile::tempdir()?;
        let save_file = temp_dir.path().join("songs.spotdl");

        let output = Command::new(&self.spotdl_path)
            .args(Self::save_args(urls, options, &save_file))
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ResolveError::SpotdlNotFound,
                _ => ResolveError::Io(e),
            })?;

        if !output.status.success() {
            debug!("spotdl stderr: {}", String::from_utf8_lossy(&output.stderr));
            return Err(ResolveError::SpotdlFailed(output.status.code()));
        }

        let content = tokio::fs::read_to_string(&save_file).await?;
        let songs = parse_song_list(&content)?;

        debug!("Resolved {} song(s)", songs.len());
        Ok(songs)
    }
}

/// Parse the JSON song list written by `spotdl save`
pub fn parse_song_list(content: &str) -> Result<Vec<Song>, ResolveError> {
    serde_json::from_str(content).map_err(|e| ResolveError::Parse(e.to_string()))
}
