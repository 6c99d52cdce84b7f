//! Subcommands of the `castgrab` binary.

use std::path::PathBuf;

use castgrab_core::DownloadRequest;
use clap::{Args, Subcommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Download a stream or video and remux the result to the target container
    Download {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Print the backend command a download would run, without running it
    Plan {
        #[command(flatten)]
        request: RequestArgs,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved paths for all castgrab directories
    Paths,
}

/// Arguments shared by every command that describes one download.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Source URL
    pub url: String,
    /// Output path or template passed to the backend
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// yt-dlp format sort expression (e.g. "res:720,ext")
    #[arg(long)]
    pub format_sort: Option<String>,
}

impl RequestArgs {
    pub fn into_request(self) -> DownloadRequest {
        let mut request = DownloadRequest::new(self.url);
        if let Some(output) = self.output {
            request = request.with_output(output);
        }
        if let Some(format_sort) = self.format_sort {
            request = request.with_format_sort(format_sort);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn test_download_args() {
        let cli = Cli::parse_from([
            "castgrab",
            "download",
            "https://twitcasting.tv/someone/movie/1",
            "-o",
            "rec/capture.ts",
            "--format-sort",
            "res:720",
        ]);
        let Some(Commands::Download { request }) = cli.command else {
            panic!("expected download command");
        };
        let request = request.into_request();
        assert_eq!(request.url, "https://twitcasting.tv/someone/movie/1");
        assert_eq!(request.output, Some(PathBuf::from("rec/capture.ts")));
        assert_eq!(request.format_sort.as_deref(), Some("res:720"));
    }

    #[test]
    fn test_plan_json_flag() {
        let cli = Cli::parse_from(["castgrab", "plan", "https://site/1", "--json"]);
        let Some(Commands::Plan { request, json }) = cli.command else {
            panic!("expected plan command");
        };
        assert!(json);
        assert_eq!(request.into_request(), DownloadRequest::new("https://site/1"));
    }

    #[test]
    fn test_download_requires_url() {
        assert!(Cli::try_parse_from(["castgrab", "download"]).is_err());
    }
}
