//! Backend command construction.
//!
//! Building a plan is pure: the backend is chosen by the caller (see
//! [`BackendKind::from_env`]) and missing configuration means an empty
//! option list.

use castgrab_core::{BackendKind, BackendPlan, DownloadRequest, Settings};
use std::path::Path;

/// Output template streamlink uses when the request has none.
pub const STREAMLINK_OUTPUT_TEMPLATE: &str = "./{author}/{time:%Y%m%d%H%M%S}-{id}.mp4";

/// Stream quality selector passed to streamlink after the URL.
pub const STREAMLINK_QUALITY: &str = "best";

const OUTPUT_FLAGS: [&str; 2] = ["-o", "--output"];

/// Builds a [`BackendPlan`] for a request.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    backend: BackendKind,
    settings: &'a Settings,
}

impl<'a> CommandBuilder<'a> {
    pub const fn new(backend: BackendKind, settings: &'a Settings) -> Self {
        Self { backend, settings }
    }

    pub fn build(&self, request: &DownloadRequest) -> BackendPlan {
        let args = match self.backend {
            BackendKind::Streamlink => self.streamlink_args(request),
            BackendKind::YtDlp => self.ytdlp_args(request),
        };

        BackendPlan {
            backend: self.backend,
            program: self.backend.executable().to_string(),
            args,
        }
    }

    fn streamlink_args(&self, request: &DownloadRequest) -> Vec<String> {
        let output = request
            .output
            .as_deref()
            .map_or_else(|| STREAMLINK_OUTPUT_TEMPLATE.to_string(), path_arg);

        let mut args = vec![
            "--loglevel".to_string(),
            "debug".to_string(),
            "--output".to_string(),
            output,
        ];
        args.extend(self.settings.streamlink_options().iter().cloned());
        args.push(request.url.clone());
        args.push(STREAMLINK_QUALITY.to_string());
        args
    }

    fn ytdlp_args(&self, request: &DownloadRequest) -> Vec<String> {
        let options = self.settings.ytdlp_options();
        let mut args: Vec<String> = options.to_vec();

        // Never emit a second output flag when the user configured one.
        if let Some(output) = request.output.as_deref() {
            if !defines_output(options) {
                args.push("--output".to_string());
                args.push(path_arg(output));
            }
        }

        if let Some(format_sort) = &request.format_sort {
            args.push("--format-sort".to_string());
            args.push(format_sort.clone());
        }

        args.push(request.url.clone());
        args
    }
}

/// Whether a yt-dlp option list already sets the output path
/// (`-o`, `--output` or `--output=<path>`).
pub fn defines_output(options: &[String]) -> bool {
    options
        .iter()
        .any(|opt| OUTPUT_FLAGS.contains(&opt.as_str()) || opt.starts_with("--output="))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
