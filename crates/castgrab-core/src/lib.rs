//! Core domain types and port definitions for castgrab.
//!
//! This crate holds everything the download pipeline agrees on without
//! touching the operating system directly:
//!
//! - `domain` - download requests, backend selection and plans
//! - `ports` - the process launcher and log sink abstractions
//! - `settings` - user configuration loaded from `config.json`
//! - `paths` - data, config and log directory resolution

pub mod domain;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{BACKEND_ENV_VAR, BackendKind, BackendPlan, DownloadRequest};
pub use paths::{PathError, config_path, data_root, log_dir};
pub use ports::{
    CommandSpec, CompletedProcess, ExitOutcome, ProcessHandle, ProcessLauncher,
    ProcessLogSink, StreamKind,
};
pub use settings::{
    DEFAULT_FFMPEG_PATH, DEFAULT_TARGET_CONTAINER, Settings, SettingsError, load_settings,
    validate_settings,
};
