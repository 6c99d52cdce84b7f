//! Container normalization with an ffmpeg stream copy.
//!
//! Runs only after a successful download, and only when the captured file
//! is not already in the target container. Encoded media is copied as-is
//! (`-c copy`); the source file is left in place whatever the result.

use castgrab_core::{CommandSpec, ExitOutcome, ProcessLauncher, Settings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Log label of the transcode process.
pub const FFMPEG_LABEL: &str = "ffmpeg";

/// Why no conversion was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The download did not exit with code 0.
    DownloadFailed,
    /// Neither a resolved nor a requested output path is known.
    NoOutput,
    /// The file already has the target extension.
    AlreadyTarget,
}

/// Source and destination of one remux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl ConversionPlan {
    /// `ffmpeg -i <source> -c copy <target>`
    pub fn command(&self, ffmpeg: &str) -> CommandSpec {
        CommandSpec::new(
            FFMPEG_LABEL,
            ffmpeg,
            vec![
                "-i".to_string(),
                self.source.to_string_lossy().into_owned(),
                "-c".to_string(),
                "copy".to_string(),
                self.target.to_string_lossy().into_owned(),
            ],
        )
    }
}

/// A conversion that was either skipped or is running in the background.
#[derive(Debug)]
pub enum ConversionTask {
    Skipped(SkipReason),
    Started {
        plan: ConversionPlan,
        completion: JoinHandle<ExitOutcome>,
    },
}

impl ConversionTask {
    /// Wait for the background conversion, if any.
    pub async fn outcome(self) -> ConversionOutcome {
        match self {
            Self::Skipped(reason) => ConversionOutcome::Skipped(reason),
            Self::Started { plan, completion } => ConversionOutcome::Finished {
                plan,
                exit: completion.await.unwrap_or_default(),
            },
        }
    }
}

/// Final state of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Skipped(SkipReason),
    Finished { plan: ConversionPlan, exit: ExitOutcome },
}

impl ConversionOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Finished { exit, .. } if exit.success())
    }
}

/// Decides whether to remux and launches ffmpeg through the launcher.
pub struct ConversionPipeline {
    launcher: Arc<dyn ProcessLauncher>,
    ffmpeg: String,
    target_container: String,
}

impl ConversionPipeline {
    pub fn new(
        launcher: Arc<dyn ProcessLauncher>,
        ffmpeg: impl Into<String>,
        target_container: impl Into<String>,
    ) -> Self {
        Self {
            launcher,
            ffmpeg: ffmpeg.into(),
            target_container: target_container.into(),
        }
    }

    pub fn from_settings(launcher: Arc<dyn ProcessLauncher>, settings: &Settings) -> Self {
        Self::new(
            launcher,
            settings.effective_ffmpeg_path(),
            settings.effective_target_container(),
        )
    }

    pub fn target_container(&self) -> &str {
        &self.target_container
    }

    /// Decide what to do, without side effects.
    pub fn plan(&self, path: Option<&Path>, download_exit: &ExitOutcome) -> Result<ConversionPlan, SkipReason> {
        if !download_exit.success() {
            return Err(SkipReason::DownloadFailed);
        }
        let source = path.ok_or(SkipReason::NoOutput)?;
        if has_extension(source, &self.target_container) {
            return Err(SkipReason::AlreadyTarget);
        }

        Ok(ConversionPlan {
            source: source.to_path_buf(),
            target: target_path(source, &self.target_container),
        })
    }

    /// Start the conversion in the background when it is needed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn maybe_convert(&self, path: Option<&Path>, download_exit: &ExitOutcome) -> ConversionTask {
        let plan = match self.plan(path, download_exit) {
            Ok(plan) => plan,
            Err(reason) => {
                if let (SkipReason::AlreadyTarget, Some(path)) = (reason, path) {
                    info!(
                        "File is already .{}, skipping conversion: {}",
                        self.target_container,
                        path.display()
                    );
                } else {
                    debug!(?reason, "Skipping conversion");
                }
                return ConversionTask::Skipped(reason);
            }
        };

        info!("Starting ffmpeg conversion for {}", plan.source.display());
        let handle = self.launcher.launch(plan.command(&self.ffmpeg));

        let target = plan.target.clone();
        let completion = tokio::spawn(async move {
            let completed = handle.wait().await;
            if completed.exit.success() {
                info!("Conversion completed for {}", target.display());
            } else {
                error!("ffmpeg failed with {}", completed.exit);
            }
            completed.exit
        });

        ConversionTask::Started { plan, completion }
    }
}

/// `source` with its extension replaced by (or set to) `container`.
///
/// A file name that is only an extension (`.ts`) becomes `.mp4`.
pub fn target_path(source: &Path, container: &str) -> PathBuf {
    if source.extension().is_none() && extension_of(source).is_some() {
        return source.with_file_name(format!(".{container}"));
    }
    source.with_extension(container)
}

fn has_extension(path: &Path, container: &str) -> bool {
    extension_of(path).is_some_and(|ext| ext.eq_ignore_ascii_case(container))
}

/// Extension of `path`, treating a bare `.ts` file name as extension `ts`.
fn extension_of(path: &Path) -> Option<&str> {
    if let Some(ext) = path.extension() {
        return ext.to_str();
    }
    path.file_name()?
        .to_str()?
        .strip_prefix('.')
        .filter(|ext| !ext.is_empty())
}
