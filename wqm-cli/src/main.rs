//! WQM CLI - Command line tool for water-quality monitoring.

use clap::Parser;
use log::debug;
use std::path::PathBuf;
use wqm_store::{StorageLayout, DEFAULT_ROOT};

#[derive(Parser)]
#[command(
    name = "wqm-cli",
    version,
    about = "Water-quality evaluation and trend forecasting toolkit"
)]
struct Cli {
    /// Folder holding one folder per water body
    #[arg(long, global = true, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    #[command(subcommand)]
    command: wqm_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("storage root: {}", cli.root.display());
    wqm_cmd::run(StorageLayout::new(&cli.root), cli.command)
}
