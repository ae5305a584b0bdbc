//! Configuration management for ytlyric

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub lyrics: LyricsConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Extension given to converted files (default: "lrc")
    pub extension: String,
    /// Directory for converted files (next to the subtitle if not set)
    pub output_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum parallel conversions
    pub max_parallel: usize,
    /// Continue on error
    pub continue_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lyrics: LyricsConfig {
                extension: "lrc".to_string(),
                output_directory: None,
            },
            batch: BatchConfig {
                max_parallel: 4,
                continue_on_error: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> crate::Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(default_config) = Self::default_config_file() {
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("YTLYRIC_").split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Location of the per-user config file
    pub fn default_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ytlyric/config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.lyrics.extension;
        if ext.is_empty() || ext.contains(['/', '\\', '.']) || ext.eq_ignore_ascii_case("srt") {
            return Err(ConfigError::InvalidValue(format!(
                "lyrics.extension must be a bare extension other than srt, got {:?}",
                ext
            )));
        }
        if self.batch.max_parallel == 0 {
            return Err(ConfigError::InvalidValue(
                "batch.max_parallel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve where the lyrics for `srt_path` should be written
    pub fn lyrics_output_path(&self, srt_path: &Path) -> PathBuf {
        let renamed = srt_path.with_extension(&self.lyrics.extension);
        match (&self.lyrics.output_directory, renamed.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => renamed,
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YtLyricError;
    use figment::Jail;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lyrics.extension, "lrc");
        assert_eq!(config.batch.max_parallel, 4);
    }

    #[test]
    fn test_load_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[lyrics]\nextension = \"txt\"\noutput_directory = \"/tmp/lyrics\"\n\n[batch]\nmax_parallel = 2\n",
            )?;
            let path = jail.directory().join("config.toml");

            let config = Config::load(Some(&path)).map_err(|e| e.to_string())?;
            assert_eq!(config.lyrics.extension, "txt");
            assert_eq!(config.lyrics.output_directory, Some(PathBuf::from("/tmp/lyrics")));
            assert_eq!(config.batch.max_parallel, 2);
            assert!(config.batch.continue_on_error);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.lyrics.extension = ".lrc".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = Config::default();
        config.lyrics.extension = "SRT".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = Config::default();
        config.batch.max_parallel = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[lyrics]\nextension = \"srt\"\n")?;
            let path = jail.directory().join("config.toml");

            assert!(matches!(
                Config::load(Some(&path)),
                Err(YtLyricError::Config(ConfigError::InvalidValue(_)))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        Jail::expect_with(|jail| {
            jail.set_env("YTLYRIC_BATCH__MAX_PARALLEL", "7");
            jail.set_env("YTLYRIC_LYRICS__EXTENSION", "txt");

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.batch.max_parallel, 7);
            assert_eq!(config.lyrics.extension, "txt");
            assert!(config.batch.continue_on_error);
            Ok(())
        });
    }

    #[test]
    fn test_lyrics_output_path() {
        let mut config = Config::default();
        assert_eq!(
            config.lyrics_output_path(Path::new("music/song.srt")),
            PathBuf::from("music/song.lrc")
        );

        config.lyrics.output_directory = Some(PathBuf::from("out"));
        assert_eq!(
            config.lyrics_output_path(Path::new("music/song.en.srt")),
            PathBuf::from("out/song.en.lrc")
        );
    }

    #[test]
    fn test_to_toml_string() {
        let rendered = Config::default().to_toml_string().unwrap();
        assert!(rendered.contains("[lyrics]"));
        assert!(rendered.contains("extension = \"lrc\""));
        assert!(rendered.contains("max_parallel = 4"));
    }
}
