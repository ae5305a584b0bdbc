use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ytlyric")]
#[command(author, version, about = "Convert SRT subtitles into LRC synchronized lyrics")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SRT file to convert (shorthand for `lyrics <SRT>`)
    #[arg(value_name = "SRT")]
    pub input: Option<PathBuf>,

    /// Output LRC path (default: input with .lrc extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single SRT file to LRC
    Lyrics {
        /// SRT subtitle file
        input: PathBuf,

        /// Output LRC path (default: input with .lrc extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert many SRT files
    Batch {
        /// Directory of .srt files, or a file listing SRT paths (one per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Maximum parallel conversions (default: batch.max_parallel)
        #[arg(short, long)]
        parallel: Option<usize>,

        /// Output directory (default: lyrics.output_directory, else next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show configuration
    Config,
}
