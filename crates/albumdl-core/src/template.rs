//! Output path templates

use crate::settings::AudioFormat;
use crate::song::Song;
use regex::{Captures, Regex};
use std::sync::OnceLock;

const EXT_PLACEHOLDER: &str = "{output-ext}";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z-]+)\}").expect("placeholder pattern is valid"))
}

/// Render a destination path for `song` from an output template.
///
/// Substituted values are sanitized so they can never introduce extra path
/// segments; the template's own `/` separators are kept. When the template
/// has no `{output-ext}` the format's extension is appended.
pub fn render(template: &str, song: &Song, format: AudioFormat) -> String {
    let rendered = placeholder_re().replace_all(template, |caps: &Captures| {
        match value_for(&caps[1], song, format) {
            Some(value) => value,
            None => caps[0].to_string(),
        }
    });

    if template.contains(EXT_PLACEHOLDER) {
        rendered.into_owned()
    } else {
        format!("{}.{}", rendered, format.extension())
    }
}

fn value_for(key: &str, song: &Song, format: AudioFormat) -> Option<String> {
    let value = match key {
        "title" => song.name.clone(),
        "artist" => song.artist.clone(),
        "artists" => song.joined_artists(),
        "album" => song.album_name.clone().unwrap_or_default(),
        "album-artist" => song.album_artist.clone().unwrap_or_default(),
        "track-number" => song
            .track_number
            .map(|n| format!("{:02}", n))
            .unwrap_or_default(),
        "tracks-count" => song.tracks_count.map(|n| n.to_string()).unwrap_or_default(),
        "disc-number" => song.disc_number.map(|n| n.to_string()).unwrap_or_default(),
        "year" => song.year.map(|y| y.to_string()).unwrap_or_default(),
        "date" => song.date.clone().unwrap_or_default(),
        "isrc" => song.isrc.clone().unwrap_or_default(),
        "output-ext" => return Some(format.extension().to_string()),
        _ => return None,
    };
    Some(sanitize_filename(&value))
}

/// Sanitize filename for filesystem
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DEFAULT_TEMPLATE, STRUCTURED_TEMPLATE};

    fn song() -> Song {
        Song {
            name: "My Song".to_string(),
            artists: vec!["Artist Name".to_string(), "Guest".to_string()],
            artist: "Artist Name".to_string(),
            album_name: Some("Best Of: Vol 1".to_string()),
            album_artist: None,
            track_number: Some(7),
            tracks_count: Some(12),
            disc_number: Some(1),
            year: Some(2001),
            date: None,
            isrc: None,
            song_id: None,
            url: None,
            download_url: None,
            duration: None,
        }
    }

    #[test]
    fn test_structured_template_appends_extension() {
        assert_eq!(
            render(STRUCTURED_TEMPLATE, &song(), AudioFormat::Flac),
            "Artist Name/Best Of_ Vol 1/My Song.flac"
        );
    }

    #[test]
    fn test_default_template() {
        assert_eq!(
            render(DEFAULT_TEMPLATE, &song(), AudioFormat::Mp3),
            "Artist Name, Guest - My Song.mp3"
        );
    }

    #[test]
    fn test_numbers_missing_and_unknown_placeholders() {
        let rendered = render(
            "{track-number}. {title} [{isrc}] {mystery}.{output-ext}",
            &song(),
            AudioFormat::Opus,
        );
        assert_eq!(rendered, "07. My Song [] {mystery}.opus");
    }

    #[test]
    fn test_values_cannot_add_path_segments() {
        let mut s = song();
        s.name = "AC/DC Cover".to_string();
        assert_eq!(render("{artist}/{title}", &s, AudioFormat::Mp3), "Artist Name/AC_DC Cover.mp3");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Normal Title"), "Normal Title");
        assert_eq!(sanitize_filename("Title/With:Special*Chars"), "Title_With_Special_Chars");
        assert_eq!(sanitize_filename("  Spaces  "), "Spaces");
    }
}
