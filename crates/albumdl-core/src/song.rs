//! Song records produced by resolution

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<String>,
    /// Primary artist
    pub artist: String,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub album_artist: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub tracks_count: Option<u32>,
    #[serde(default)]
    pub disc_number: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub isrc: Option<String>,
    #[serde(default)]
    pub song_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Direct media URL, when resolution already matched one
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Song {
    /// `Artist - Title`, as used for logs and search queries
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.name)
    }

    /// All artists joined for display, falling back to the primary artist
    pub fn joined_artists(&self) -> String {
        if self.artists.is_empty() {
            self.artist.clone()
        } else {
            self.artists.join(", ")
        }
    }
}
