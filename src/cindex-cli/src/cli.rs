//! CLI argument definitions for cindex

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cindex")]
#[command(about = "Dump a clangd index file as JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the .idx file
    #[arg(value_name = "INDEX_PATH")]
    pub input: PathBuf,

    /// Output file (writes to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
