use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "exhibition-gallery",
    author = "Exhibition Gallery Team",
    version,
    about = "A small exhibition web app for browsing and liking artworks",
    long_about = "A small exhibition web app where visitors browse the uploaded artworks and cast likes, and an administrator curates the exhibition"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the exhibition web server
    Run {
        /// Port to bind the web server to
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Host to bind the web server to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Directory holding the JSON store files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
        /// Directory for uploaded images (defaults to <DATA_DIR>/uploads)
        #[arg(short, long)]
        uploads_dir: Option<PathBuf>,
    },
}
