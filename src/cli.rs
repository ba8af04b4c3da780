use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a caption track from a recognizer JSON file
    Captions {
        /// Recognizer JSON output
        #[arg(short, long)]
        input: PathBuf,

        /// Output SRT file
        #[arg(short, long)]
        output: PathBuf,

        /// Recognizer output format (openai, whisper-cpp)
        #[arg(short, long, default_value = "openai")]
        format: String,

        /// Audio length in seconds, for the transcript coverage report
        #[arg(long)]
        audio_duration: Option<f64>,
    },

    /// Build caption tracks for every recognizer JSON file in a directory
    Batch {
        /// Directory containing recognizer JSON files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output directory for SRT files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Recognizer output format (openai, whisper-cpp)
        #[arg(short, long, default_value = "openai")]
        format: String,
    },

    /// Align the quoted verses of a source text with a caption track
    Align {
        /// Source text containing the quoted verses
        #[arg(short, long)]
        source: PathBuf,

        /// Caption track to align against
        #[arg(long)]
        srt: PathBuf,

        /// Output SRT with corrected quotation marks
        #[arg(short, long)]
        output: PathBuf,

        /// Output JSON verse metadata
        #[arg(short, long)]
        metadata: PathBuf,
    },

    /// List the quoted verses of a source text and their references
    References {
        /// Source text containing the quoted verses
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Delay every caption of an SRT file
    Shift {
        /// Input SRT file
        #[arg(short, long)]
        input: PathBuf,

        /// Output SRT file
        #[arg(short, long)]
        output: PathBuf,

        /// Delay in seconds (negative values advance)
        #[arg(short, long, allow_hyphen_values = true)]
        delay: f64,
    },

    /// Push captions back after each spoken invitation to pray
    Pauses {
        /// Input SRT file
        #[arg(short, long)]
        input: PathBuf,

        /// Output SRT file
        #[arg(short, long)]
        output: PathBuf,

        /// Pause length in milliseconds
        #[arg(long)]
        pause_ms: Option<u64>,
    },
}
