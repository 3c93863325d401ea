//! albumdl-core: Interactive album download console and its collaborators

pub mod config;
pub mod console;
pub mod downloader;
pub mod error;
pub mod overrides;
pub mod resolver;
pub mod settings;
pub mod song;
pub mod template;

pub use config::Config;
pub use error::{AlbumDlError, Result};
pub use settings::Settings;
pub use song::Song;
