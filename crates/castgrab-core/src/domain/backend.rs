//! Capture backend selection and the command plan derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable that selects the capture backend.
pub const BACKEND_ENV_VAR: &str = "CASTGRAB_DOWNLOADER";

/// External tool used to capture a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// `yt-dlp`, driven by the configured option list.
    #[default]
    YtDlp,
    /// `streamlink`, driven by the per-source output template.
    Streamlink,
}

impl BackendKind {
    /// Select a backend from the raw value of [`BACKEND_ENV_VAR`].
    ///
    /// Only the exact value `streamlink` selects streamlink; anything else,
    /// including absence, selects the default backend.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("streamlink") => Self::Streamlink,
            _ => Self::YtDlp,
        }
    }

    /// Select a backend from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(BACKEND_ENV_VAR).ok().as_deref())
    }

    /// Executable name for this backend.
    pub const fn executable(self) -> &'static str {
        match self {
            Self::YtDlp => "yt-dlp",
            Self::Streamlink => "streamlink",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// Executable and ordered arguments for one capture run.
///
/// Computed once from a request and the settings; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendPlan {
    pub backend: BackendKind,
    pub program: String,
    pub args: Vec<String>,
}

impl BackendPlan {
    /// Render the plan as a single space-joined command line for logging.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
