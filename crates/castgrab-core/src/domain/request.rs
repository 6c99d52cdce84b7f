use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A request to capture one stream URL.
///
/// Created by the caller and owned by one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Source stream URL.
    pub url: String,
    /// Explicit output path or template, passed through to the backend.
    pub output: Option<PathBuf>,
    /// Format preference forwarded to yt-dlp as `--format-sort`.
    pub format_sort: Option<String>,
}

impl DownloadRequest {
    /// Create a request for a URL with no output or format preference.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            output: None,
            format_sort: None,
        }
    }

    /// Set the output path template.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the format preference.
    #[must_use]
    pub fn with_format_sort(mut self, format_sort: impl Into<String>) -> Self {
        self.format_sort = Some(format_sort.into());
        self
    }
}
