//! Process log sink port for subprocess output capture.
//!
//! This port abstracts the destination for subprocess output lines,
//! allowing the CLI to route them into `tracing` while tests record them.

use serde::Serialize;
use std::fmt;

/// Which standard stream a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port for appending subprocess output lines to a sink.
///
/// Implementations should be thread-safe and non-blocking.
pub trait ProcessLogSink: Send + Sync {
    /// Append one line of subprocess output.
    ///
    /// # Arguments
    ///
    /// * `label` - Log label of the process (e.g. `yt-dlp`, `ffmpeg`)
    /// * `stream` - Stream the line was read from
    /// * `line` - Trimmed, non-empty line content
    fn append(&self, label: &str, stream: StreamKind, line: &str);
}
