//! Platform-specific path resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV_VAR: &str = "CASTGRAB_DATA_DIR";

const APP_DIR_NAME: &str = "castgrab";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_DIR_NAME: &str = "logs";

/// Get the root directory for application data (config, logs).
///
/// Resolution order:
/// 1. `CASTGRAB_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/castgrab`)
///
/// The directory is created if it does not exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV_VAR) {
        Ok(path) => resolve_override(&path)?,
        Err(_) => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join(APP_DIR_NAME),
    };

    ensure_dir(&root)?;
    Ok(root)
}

/// Location of the settings file.
pub fn config_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(CONFIG_FILE_NAME))
}

/// Directory holding the daily-rotated log files. Created on demand.
pub fn log_dir() -> Result<PathBuf, PathError> {
    let dir = data_root()?.join(LOG_DIR_NAME);
    ensure_dir(&dir)?;
    Ok(dir)
}

fn resolve_override(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }
    Ok(PathBuf::from(trimmed))
}

fn ensure_dir(path: &Path) -> Result<(), PathError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_override_rejects_blank() {
        assert!(matches!(resolve_override("   "), Err(PathError::EmptyPath)));
        assert_eq!(
            resolve_override(" /data/castgrab ").unwrap(),
            PathBuf::from("/data/castgrab")
        );
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Idempotent
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_fails_on_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            ensure_dir(&file.join("child")),
            Err(PathError::CreateFailed { .. })
        ));
    }
}
