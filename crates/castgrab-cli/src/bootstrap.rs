//! CLI bootstrap - the composition root.
//!
//! The only place where concrete implementations are instantiated:
//! - Settings (via castgrab-core)
//! - Subprocess launcher and log sink (via castgrab-runtime)
//! - Downloader (via castgrab-download)

use std::path::PathBuf;
use std::sync::Arc;

use castgrab_core::{BackendKind, Settings, config_path, load_settings, validate_settings};
use castgrab_download::Downloader;
use castgrab_runtime::{SubprocessLauncher, TracingLogSink};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Settings file; `None` uses the default location.
    pub config_path: Option<PathBuf>,
    /// Output directory override for this invocation.
    pub out_dir: Option<PathBuf>,
    pub backend: BackendKind,
}

impl CliConfig {
    /// Build the config from global flags and the environment.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli.config.clone(),
            out_dir: cli.out_dir.clone(),
            backend: BackendKind::from_env(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub settings: Arc<Settings>,
    pub downloader: Downloader,
    /// Where the settings were loaded from.
    pub config_path: PathBuf,
}

/// Load settings and wire the downloader.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let path = match config.config_path {
        Some(path) => path,
        None => config_path()?,
    };

    let mut settings = load_settings(&path)?;
    if let Some(out_dir) = config.out_dir {
        settings.out_dir = Some(out_dir);
    }
    validate_settings(&settings)?;
    let settings = Arc::new(settings);

    let launcher = Arc::new(SubprocessLauncher::new(Arc::new(TracingLogSink)));
    let downloader = Downloader::new(launcher, Arc::clone(&settings), config.backend);

    debug!(backend = %config.backend, config = %path.display(), "CLI context ready");

    Ok(CliContext {
        settings,
        downloader,
        config_path: path,
    })
}
