//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Record live streams and videos with yt-dlp or streamlink.
///
/// The backend is chosen with the `CASTGRAB_DOWNLOADER` environment
/// variable; only `streamlink` selects streamlink.
#[derive(Parser)]
#[command(name = "castgrab")]
#[command(about = "Record live streams and remux them to mp4")]
#[command(version)]
pub struct Cli {
    /// Read settings from this file instead of the default config.json
    #[arg(long, global = true, env = "CASTGRAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the output directory for this invocation
    #[arg(long = "out-dir", global = true)]
    pub out_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
