//! Session settings shared by the console and the download collaborators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output template used when artist/album folder structuring is requested
pub const STRUCTURED_TEMPLATE: &str = "{artist}/{album}/{title}";

/// Output template used when none is configured
pub const DEFAULT_TEMPLATE: &str = "{artists} - {title}.{output-ext}";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lay files out as artist/album/title for console sessions
    pub structured: bool,
    /// Replace spaces with hyphens in downloaded file names
    pub replace_spaces: bool,
    /// Output path template
    pub output: String,
    /// Audio format handed to the downloader
    pub format: AudioFormat,
    /// Use YouTube Music metadata when resolving
    pub ytm_data: bool,
    /// Number tracks by their playlist position
    pub playlist_numbering: bool,
    /// Album names to drop from resolved results
    pub ignore_albums: Vec<String>,
    /// Only keep songs from albums of this type
    pub album_type: Option<AlbumType>,
    /// Keep each track's own cover art inside playlists
    pub playlist_retain_track_cover: bool,
    /// Maximum concurrent downloads within one batch
    pub threads: usize,
    /// Re-download files that already exist
    pub overwrite: bool,
    /// Filename transform, present only while a session has space replacement on
    #[serde(skip)]
    pub space_replacer: Option<PathTransform>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            structured: false,
            replace_spaces: false,
            output: DEFAULT_TEMPLATE.to_string(),
            format: AudioFormat::Mp3,
            ytm_data: false,
            playlist_numbering: false,
            ignore_albums: Vec::new(),
            album_type: None,
            playlist_retain_track_cover: false,
            threads: 4,
            overwrite: false,
            space_replacer: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Flac,
    Ogg,
    Opus,
    M4a,
    Wav,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Opus => "opus",
            AudioFormat::M4a => "m4a",
            AudioFormat::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlbumType::Album => write!(f, "album"),
            AlbumType::Single => write!(f, "single"),
            AlbumType::Compilation => write!(f, "compilation"),
        }
    }
}

/// A rewrite applied to every destination path of a download batch
#[derive(Clone, Copy)]
pub struct PathTransform(fn(&str) -> String);

impl PathTransform {
    pub const fn new(f: fn(&str) -> String) -> Self {
        Self(f)
    }

    pub fn apply(&self, path: &str) -> String {
        (self.0)(path)
    }
}

impl fmt::Debug for PathTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PathTransform(..)")
    }
}

/// The space replacer installed by `replace_spaces` sessions
pub fn space_replacer() -> PathTransform {
    PathTransform::new(replace_spaces_in_filename)
}

/// Replace spaces with hyphens in the last `/`-separated segment only
pub fn replace_spaces_in_filename(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, file)) => format!("{}/{}", dir, file.replace(' ', "-")),
        None => path.replace(' ', "-"),
    }
}
