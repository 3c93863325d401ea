//! Configuration management for albumdl

use crate::error::ConfigError;
use crate::settings::Settings;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to spotdl binary (auto-detected if not set)
    pub spotdl: Option<PathBuf>,
    /// Path to yt-dlp binary (auto-detected if not set)
    pub yt_dlp: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(config_file)
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(path) = default_config_file() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Nested keys use a double underscore: ALBUMDL_SETTINGS__FORMAT
        figment.merge(Env::prefixed("ALBUMDL_").split("__"))
    }

    /// Get spotdl path, auto-detecting if not configured
    pub fn spotdl_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.spotdl {
            Ok(path.clone())
        } else {
            which::which("spotdl")
                .map_err(|_| ConfigError::InvalidValue("spotdl not found in PATH".to_string()))
        }
    }

    /// Get yt-dlp path, auto-detecting if not configured
    pub fn yt_dlp_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.yt_dlp {
            Ok(path.clone())
        } else {
            which::which("yt-dlp")
                .map_err(|_| ConfigError::InvalidValue("yt-dlp not found in PATH".to_string()))
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

/// Location of the per-user config file
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("albumdl/config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AlbumType, AudioFormat, DEFAULT_TEMPLATE};
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config: Config = Config::figment(None).extract()?;
            assert_eq!(config.settings.output, DEFAULT_TEMPLATE);
            assert_eq!(config.settings.format, AudioFormat::Mp3);
            assert!(config.paths.spotdl.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "albumdl.toml",
                r#"
                [paths]
                yt_dlp = "/opt/bin/yt-dlp"

                [settings]
                format = "flac"
                ignore_albums = ["Live at Wembley"]
                album_type = "single"
                "#,
            )?;
            jail.set_env("ALBUMDL_SETTINGS__THREADS", "2");
            jail.set_env("ALBUMDL_SETTINGS__FORMAT", "opus");

            let config: Config = Config::figment(Some(Path::new("albumdl.toml"))).extract()?;
            assert_eq!(config.paths.yt_dlp, Some(PathBuf::from("/opt/bin/yt-dlp")));
            assert_eq!(config.settings.format, AudioFormat::Opus);
            assert_eq!(config.settings.threads, 2);
            assert_eq!(config.settings.album_type, Some(AlbumType::Single));
            assert_eq!(config.settings.ignore_albums, vec!["Live at Wembley"]);
            // untouched keys keep their defaults
            assert_eq!(config.settings.output, DEFAULT_TEMPLATE);
            Ok(())
        });
    }

    #[test]
    fn test_bad_value_is_a_load_error() {
        Jail::expect_with(|jail| {
            jail.set_env("ALBUMDL_SETTINGS__THREADS", "many");
            let err = Config::load(None).unwrap_err();
            assert!(matches!(err, ConfigError::LoadError(_)));
            assert!(err.to_string().starts_with("Failed to load config: "));
            Ok(())
        });
    }

    #[test]
    fn test_configured_paths_skip_detection() {
        let config = Config {
            paths: PathsConfig {
                spotdl: Some(PathBuf::from("/x/spotdl")),
                yt_dlp: Some(PathBuf::from("/x/yt-dlp")),
            },
            settings: Settings::default(),
        };
        assert_eq!(config.spotdl_path().unwrap(), PathBuf::from("/x/spotdl"));
        assert_eq!(config.yt_dlp_path().unwrap(), PathBuf::from("/x/yt-dlp"));
    }

    #[test]
    fn test_to_toml_omits_space_replacer() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[settings]"));
        assert!(rendered.contains("format = \"mp3\""));
        assert!(!rendered.contains("space_replacer"));
    }
}
