//! Path utilities for castgrab data directories.
//!
//! This module provides the canonical path resolution for:
//! - The data root (`CASTGRAB_DATA_DIR` or the OS data directory)
//! - The settings file
//! - The log directory
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle presentation

mod error;
mod platform;

pub use error::PathError;
pub use platform::{DATA_DIR_ENV_VAR, config_path, data_root, log_dir};
