//! SRT subtitle to LRC synchronized lyrics conversion
//!
//! An SRT document is a sequence of blank-line separated blocks:
//!
//! ```text
//! 1
//! 00:01:23,456 --> 00:01:25,789
//! First line of text
//! ```
//!
//! Each valid block becomes one `[MM:SS.CC]text` line keyed on the block's
//! start time. Blocks that cannot be parsed are skipped and the rest of the
//! document is still converted.

use crate::config::Config;
use crate::error::LyricsError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension used when no output path is given
pub const LRC_EXTENSION: &str = "lrc";

static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+):([0-9]+):([0-9]+)[,.]([0-9]+)").unwrap()
});

static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+:[0-9]+:[0-9]+[,.][0-9]+)\s*-->\s*([0-9]+:[0-9]+:[0-9]+[,.][0-9]+)")
        .unwrap()
});

static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// One subtitle entry: index line, time range and text lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleBlock {
    pub index: String,
    pub start: String,
    pub end: String,
    pub text: Vec<String>,
}

/// LRC timestamp, rendered as `[MM:SS.CC]`
///
/// Minutes are unbounded: hours fold into the minutes field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LrcTimestamp {
    pub minutes: u64,
    pub seconds: u64,
    pub centiseconds: u64,
}

impl fmt::Display for LrcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}.{:02}]",
            self.minutes, self.seconds, self.centiseconds
        )
    }
}

/// A single synchronized lyric line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcLine {
    pub timestamp: LrcTimestamp,
    pub text: String,
}

impl fmt::Display for LrcLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.timestamp, self.text)
    }
}

/// Convert an SRT timestamp (`H:MM:SS,mmm` or `H:MM:SS.mmm`) to an LRC timestamp.
///
/// The fraction is read as milliseconds and truncated to centiseconds, so
/// `00:01:23,456` becomes `[01:23.45]`. Fractions with other than three digits
/// are not rescaled.
pub fn srt_time_to_lrc(srt_time: &str) -> Option<LrcTimestamp> {
    let caps = TIMESTAMP_REGEX.captures(srt_time)?;

    let hours: u64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: u64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(3)?.as_str().parse().ok()?;
    let millis: u64 = caps.get(4)?.as_str().parse().ok()?;

    Some(LrcTimestamp {
        minutes: hours.checked_mul(60)?.checked_add(minutes)?,
        seconds,
        centiseconds: millis / 10,
    })
}

/// Split an SRT document into blocks, dropping any that are malformed
pub fn parse_blocks(content: &str) -> Vec<SubtitleBlock> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim_start_matches('\u{FEFF}').trim();

    let mut blocks = Vec::new();

    for raw in BLOCK_SEPARATOR_REGEX.split(normalized) {
        let lines: Vec<&str> = raw.trim().split('\n').collect();
        if lines.len() < 3 {
            debug!("Skipping block with {} line(s)", lines.len());
            continue;
        }

        let Some(range) = TIME_RANGE_REGEX.captures(lines[1]) else {
            debug!("Skipping block with malformed time range: {:?}", lines[1]);
            continue;
        };

        blocks.push(SubtitleBlock {
            index: lines[0].to_string(),
            start: range[1].to_string(),
            end: range[2].to_string(),
            text: lines[2..].iter().map(|l| l.to_string()).collect(),
        });
    }

    blocks
}

/// Remove formatting tags such as `<i>` or `<font color="red">`
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Convert SRT content to lyric lines, in document order
pub fn convert(content: &str) -> Vec<LrcLine> {
    parse_blocks(content)
        .into_iter()
        .filter_map(|block| {
            let Some(timestamp) = srt_time_to_lrc(&block.start) else {
                debug!("Skipping block {}: bad start time {:?}", block.index, block.start);
                return None;
            };

            let text = strip_tags(&block.text.join(" ")).trim().to_string();
            if text.is_empty() {
                debug!("Skipping block {}: no text after cleanup", block.index);
                return None;
            }

            Some(LrcLine { timestamp, text })
        })
        .collect()
}

/// Render lyric lines as an LRC document (newline-terminated)
pub fn render(lines: &[LrcLine]) -> String {
    let mut out = lines
        .iter()
        .map(LrcLine::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Output path used when none is given: the input with an `.lrc` extension
pub fn default_output_path(srt_path: &Path) -> PathBuf {
    srt_path.with_extension(LRC_EXTENSION)
}

/// Read an SRT file and convert it, failing if nothing usable remains
fn read_lyrics(srt_path: &Path) -> Result<Vec<LrcLine>, LyricsError> {
    let content = match fs::read_to_string(srt_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LyricsError::NotFound(srt_path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let lines = convert(&content);
    if lines.is_empty() {
        return Err(LyricsError::NoLyrics(srt_path.to_path_buf()));
    }
    Ok(lines)
}

fn write_lyrics(lrc_path: &Path, lines: &[LrcLine]) -> Result<(), LyricsError> {
    fs::write(lrc_path, render(lines))?;
    info!("Wrote {} lyric lines to {}", lines.len(), lrc_path.display());
    Ok(())
}

/// Refuse to write the lyrics over the subtitle they come from
fn ensure_distinct(srt_path: &Path, lrc_path: &Path) -> Result<(), LyricsError> {
    let same = srt_path == lrc_path
        || matches!(
            (fs::canonicalize(srt_path), fs::canonicalize(lrc_path)),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        return Err(LyricsError::OutputIsInput(lrc_path.to_path_buf()));
    }
    Ok(())
}

/// Convert an SRT file to LRC, reporting why nothing was written on failure.
///
/// No file is created when the document holds no usable lyrics.
pub fn try_srt_to_lrc(srt_path: &Path, lrc_path: Option<&Path>) -> Result<PathBuf, LyricsError> {
    let lrc_path = lrc_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(srt_path));
    ensure_distinct(srt_path, &lrc_path)?;

    let lines = read_lyrics(srt_path)?;
    write_lyrics(&lrc_path, &lines)?;
    Ok(lrc_path)
}

/// Convert an SRT file to LRC.
///
/// Returns the path written, or `None` if the input is missing, unreadable,
/// contains no usable blocks or would be overwritten by the output.
pub fn srt_to_lrc(srt_path: &Path, lrc_path: Option<&Path>) -> Option<PathBuf> {
    match try_srt_to_lrc(srt_path, lrc_path) {
        Ok(path) => Some(path),
        Err(e @ (LyricsError::NotFound(_) | LyricsError::NoLyrics(_))) => {
            debug!("{}", e);
            None
        }
        Err(e) => {
            warn!("Lyrics conversion of {} failed: {}", srt_path.display(), e);
            None
        }
    }
}

/// Convert using the configured extension and output directory
///
/// The output directory is only created once the input has produced lyrics.
pub fn convert_with_config(config: &Config, srt_path: &Path) -> crate::Result<PathBuf> {
    let lrc_path = config.lyrics_output_path(srt_path);
    ensure_distinct(srt_path, &lrc_path)?;

    let lines = read_lyrics(srt_path)?;

    if let Some(ref dir) = config.lyrics.output_directory {
        fs::create_dir_all(dir)?;
    }

    write_lyrics(&lrc_path, &lines)?;
    Ok(lrc_path)
}
