//! Error types for ytlyric-core

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, YtLyricError>;

#[derive(Error, Debug)]
pub enum YtLyricError {
    #[error("Lyrics conversion failed: {0}")]
    Lyrics(#[from] LyricsError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("Subtitle file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No timed lyrics found in {}", .0.display())]
    NoLyrics(PathBuf),

    #[error("Refusing to overwrite the subtitle file {} with its lyrics", .0.display())]
    OutputIsInput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
