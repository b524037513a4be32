use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Pack directory trees into a token-efficient document for LLMs"
)]
pub struct Cli {
    /// Directories or files to scan
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Configuration file (JSON, or TOML by extension); created with defaults if missing
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory the output document is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Name of the output document
    #[arg(long)]
    pub output_filename: Option<String>,

    /// Print the document to stdout instead of writing the output file
    #[arg(long)]
    pub stdout: bool,

    /// Glob patterns, relative to each scanned root, to leave out entirely
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Honour the root's .gitignore
    #[arg(long)]
    pub gitignore: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
