//! Mixtape batch updater CLI.
//!
//! Usage:
//!   mixtape <data-file> <change-file>
//!
//! Merges the change log into the library document and prints the path
//! of the updated document. The run is all-or-nothing: any failure
//! aborts with a non-zero exit and the partial output must be
//! discarded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mixtape_engine::run_update;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mixtape")]
#[command(about = "Merge a change log into a playlist library document")]
struct Args {
    /// Library document: a JSON array of users with playlists and songs
    data_file: PathBuf,

    /// Line-oriented change log (ADD_SONG / ADD_PLAYLIST / REMOVE_PLAYLIST)
    change_file: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let output = run_update(&args.data_file, &args.change_file)
        .with_context(|| format!("updating {}", args.data_file.display()))?;

    info!("output in: {}", output.display());
    println!("{}", output.display());
    Ok(())
}
