//! Settings domain types, loading and validation.
//!
//! Settings live in a camelCase JSON file (`config.json` under the data
//! root). Every field is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default transcode executable.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Default container captured files are normalized to.
pub const DEFAULT_TARGET_CONTAINER: &str = "mp4";

/// Application settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Extra yt-dlp options (legacy key, checked first).
    pub ytdl_options: Option<Vec<String>>,

    /// Extra yt-dlp options.
    pub ytdlp_options: Option<Vec<String>>,

    /// Extra streamlink options.
    pub streamlink_options: Option<Vec<String>>,

    /// Directory the backends write into.
    pub out_dir: Option<PathBuf>,

    /// Path or name of the ffmpeg executable.
    pub ffmpeg_path: Option<String>,

    /// Container extension captured files are converted to.
    pub target_container: Option<String>,
}

impl Settings {
    /// Options for yt-dlp: the first non-empty of `ytdlOptions` and
    /// `ytdlpOptions`, or nothing.
    pub fn ytdlp_options(&self) -> &[String] {
        [&self.ytdl_options, &self.ytdlp_options]
            .into_iter()
            .flatten()
            .find(|opts| !opts.is_empty())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Options for streamlink, or nothing.
    pub fn streamlink_options(&self) -> &[String] {
        self.streamlink_options.as_deref().unwrap_or_default()
    }

    /// Effective output directory (defaults to the working directory).
    pub fn effective_out_dir(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Effective ffmpeg executable.
    pub fn effective_ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or(DEFAULT_FFMPEG_PATH)
    }

    /// Effective target container extension, without a leading dot.
    pub fn effective_target_container(&self) -> &str {
        self.target_container
            .as_deref()
            .map_or(DEFAULT_TARGET_CONTAINER, |c| c.trim().trim_start_matches('.'))
    }
}

/// Settings loading or validation error.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Target container cannot be empty")]
    EmptyTargetContainer,

    #[error("ffmpeg path cannot be empty")]
    EmptyFfmpegPath,
}

/// Load settings from a JSON file.
///
/// A missing file yields default settings.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings: Settings =
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings
        .target_container
        .as_ref()
        .is_some_and(|c| c.trim().trim_start_matches('.').is_empty())
    {
        return Err(SettingsError::EmptyTargetContainer);
    }

    if settings
        .ffmpeg_path
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyFfmpegPath);
    }

    Ok(())
}
