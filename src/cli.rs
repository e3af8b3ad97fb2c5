use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ytdeck::clip::EndsIn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytdeck",
    about = "Curate and replay trimmed YouTube clips",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show extra diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Save a clip from a YouTube URL
    Add {
        /// YouTube video URL (watch, embed, /v/ or youtu.be)
        url: String,

        /// Title for the saved clip
        #[arg(short, long)]
        title: String,

        /// Clip length in seconds (5, 10, 15, 30) or "never"
        #[arg(short, long)]
        ends_in: Option<EndsIn>,
    },

    /// List saved clips, newest first
    List {
        /// Output format: text (default), json
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Change a clip's video, length or title
    Edit {
        /// Track number as shown by `list`
        index: usize,

        /// Replacement YouTube video URL
        #[arg(short, long)]
        url: Option<String>,

        /// New clip length in seconds (5, 10, 15, 30) or "never"
        #[arg(short, long)]
        ends_in: Option<EndsIn>,

        /// New title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete a clip
    Remove {
        /// Track number as shown by `list`
        index: usize,
    },

    /// Show playback details for a clip
    Play {
        /// Track number as shown by `list`
        index: usize,

        /// Start paused instead of playing immediately
        #[arg(long)]
        no_autoplay: bool,
    },

    /// Print a clip's shareable URL
    Share {
        /// Track number as shown by `list`
        index: usize,
    },

    /// Download a clip's thumbnail image
    Thumb {
        /// Track number as shown by `list`
        index: usize,

        /// Write to this path instead of <VIDEO_ID>.jpg
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill an empty library with sample clips
    Seed,
}
