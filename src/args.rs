use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Override the template data directory from config.json
    #[arg(long)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Average a capture run into a sign template and persist it
    Build {
        /// Sign label, e.g. hello
        #[arg(long)]
        sign: String,

        /// Source video reference the frames were captured from
        #[arg(long)]
        video: String,

        /// JSON file with the captured landmark frames (array of frames)
        #[arg(long)]
        frames: PathBuf,

        /// Optional frame limit for quicker experiments
        #[arg(long)]
        max_frames: Option<usize>,
    },

    /// Classify a live landmark frame against the stored templates
    Classify {
        /// JSON file with one landmark frame (array of points)
        #[arg(long)]
        frame: PathBuf,
    },

    /// Run the wrist-greeting rules on a live pose frame
    Gesture {
        /// JSON file with one landmark frame (array of points)
        #[arg(long)]
        frame: PathBuf,
    },

    /// Print a stored template record
    Show {
        /// Sign label (case-insensitive)
        sign: String,
    },

    /// Flatten retained raw frames into a flat training dataset
    Export {
        #[arg(long, default_value = "sign_dataset.json")]
        out: PathBuf,

        /// Max rows per sign (default 100, use 0 for unlimited)
        #[arg(long)]
        limit_frames: Option<usize>,
    },
}
