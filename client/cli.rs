use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "classify-lens", version, about = "Preview images and submit them to a classification endpoint")]
pub struct Cli {
    #[arg(long, global = true, help = "JSON config file (base_url, predict_path, ping_path, max_preview)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, env = "CLASSIFY_LENS_BASE_URL", help = "Base URL of the classification server")]
    pub base_url: Option<String>,
    #[arg(long, global = true, help = "Largest preview edge in pixels")]
    pub max_preview: Option<u32>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scale an image into the preview box
    Preview {
        image: PathBuf,
        #[arg(long, help = "Write the rendered page to this file")]
        out: Option<PathBuf>,
    },
    /// Upload an image and print the predicted class
    Predict {
        image: Option<PathBuf>,
        #[arg(long, help = "Write the rendered page to this file")]
        out: Option<PathBuf>,
    },
    /// Preview and predict at the same time, then write the page
    Show {
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Check that the classification server is up
    Ping,
}
