//! CLI-specific error types and exit code mapping.

use castgrab_core::{PathError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings file could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data, config or log directory could not be resolved.
    #[error("Path error: {0}")]
    Paths(String),

    /// The backend process did not exit successfully.
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// The background orchestration task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error (including a failed download)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DownloadFailed(_) => 1,
            Self::Internal(_) => 70, // EX_SOFTWARE
            Self::Paths(_) => 73,    // EX_CANTCREAT
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Paths(err.to_string())
    }
}
