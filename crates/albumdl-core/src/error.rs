//! Error types for albumdl-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlbumDlError>;

#[derive(Error, Debug)]
pub enum AlbumDlError {
    #[error("Resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("spotdl not found. Install with: pipx install spotdl")]
    SpotdlNotFound,

    #[error("spotdl failed with exit code: {0:?}")]
    SpotdlFailed(Option<i32>),

    #[error("Failed to parse song list: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("yt-dlp not found. Install with: pipx install yt-dlp")]
    YtDlpNotFound,

    #[error("yt-dlp failed with exit code: {0:?}")]
    YtDlpFailed(Option<i32>),

    #[error("Video unavailable or private: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Whether the error makes every remaining song in a batch fail the same way
    pub fn is_fatal(&self) -> bool {
        matches!(self, DownloadError::YtDlpNotFound)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_tool_is_fatal() {
        assert!(DownloadError::YtDlpNotFound.is_fatal());
        assert!(!DownloadError::YtDlpFailed(Some(1)).is_fatal());
        assert!(!DownloadError::Unavailable("x".to_string()).is_fatal());
    }

    #[test]
    fn test_errors_wrap_into_top_level() {
        let err: AlbumDlError = ResolveError::SpotdlFailed(Some(2)).into();
        assert_eq!(
            err.to_string(),
            "Resolution failed: spotdl failed with exit code: Some(2)"
        );
    }
}
