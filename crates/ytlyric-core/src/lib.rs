//! ytlyric-core: SRT subtitle to LRC synchronized lyrics conversion

pub mod config;
pub mod error;
pub mod lyrics;

pub use config::Config;
pub use error::{YtLyricError, Result};
pub use lyrics::{srt_to_lrc, try_srt_to_lrc, LrcLine, LrcTimestamp};
