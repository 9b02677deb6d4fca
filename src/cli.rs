use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "booknotectl")]
#[command(about = "Fetch Amazon/Kindle book metadata and create Markdown notes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch book metadata for a product URL and print it
    Fetch {
        /// Product URL, short link, or pasted text containing one
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch book metadata and write a rendered Markdown note
    Create {
        /// Product URL, short link, or pasted text containing one
        url: String,

        /// Destination directory (uses config default if not specified)
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Filename template (uses config default if not specified)
        #[arg(long)]
        filename_template: Option<String>,

        /// Note template file (uses config default or built-in if not specified)
        #[arg(long)]
        template: Option<PathBuf>,

        /// Keep the remote cover URL instead of downloading the image
        #[arg(long)]
        no_download_image: bool,
    },

    /// List available template placeholders
    Fields,

    /// Create a config file with default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}
