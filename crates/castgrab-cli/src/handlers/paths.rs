//! Paths command handler.
//!
//! Prints every resolved castgrab location in `key = value` format.

use std::path::Path;

use anyhow::Result;
use castgrab_core::{config_path, data_root, log_dir};

/// Execute the paths command. `config_override` is the `--config` flag.
pub fn execute(config_override: Option<&Path>) -> Result<()> {
    let config = match config_override {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };
    println!("{}", render(&data_root()?, &config, &log_dir()?));
    Ok(())
}

pub fn render(data_root: &Path, config: &Path, logs: &Path) -> String {
    [("data_root", data_root), ("config", config), ("logs", logs)]
        .iter()
        .map(|(key, path)| format!("{key} = {}", path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
