//! Download orchestration.
//!
//! [`Downloader::download_url`] launches the backend and returns at once.
//! A spawned task waits for the backend to finish, resolves the output file
//! and chains the conversion; its [`DownloadReport`] is available through
//! the returned join handle.

use crate::command::CommandBuilder;
use crate::conversion::{ConversionOutcome, ConversionPipeline};
use crate::output::{OutputResolver, ResolveContext, ResolvedOutput};
use castgrab_core::{
    BackendKind, BackendPlan, CommandSpec, DownloadRequest, ExitOutcome, ProcessLauncher, Settings,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, trace, warn};

/// Result of one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub plan: BackendPlan,
    /// How the backend process ended.
    pub exit: ExitOutcome,
    /// File detected as the download result, if any.
    pub resolved: Option<ResolvedOutput>,
    pub conversion: ConversionOutcome,
}

impl DownloadReport {
    pub const fn download_succeeded(&self) -> bool {
        self.exit.success()
    }

    /// Path of the final artifact: the converted file, else the detected one.
    pub fn final_path(&self) -> Option<PathBuf> {
        match &self.conversion {
            ConversionOutcome::Finished { plan, exit } if exit.success() => Some(plan.target.clone()),
            _ => self.resolved.as_ref().map(|r| r.path.clone()),
        }
    }
}

/// Runs capture, output detection and conversion for download requests.
///
/// Requests are independent of each other; nothing is shared between runs
/// except the filesystem.
pub struct Downloader {
    launcher: Arc<dyn ProcessLauncher>,
    settings: Arc<Settings>,
    backend: BackendKind,
    resolver: Arc<OutputResolver>,
    conversion: Arc<ConversionPipeline>,
}

impl Downloader {
    pub fn new(launcher: Arc<dyn ProcessLauncher>, settings: Arc<Settings>, backend: BackendKind) -> Self {
        let conversion = Arc::new(ConversionPipeline::from_settings(Arc::clone(&launcher), &settings));
        Self {
            launcher,
            settings,
            backend,
            resolver: Arc::new(OutputResolver::default()),
            conversion,
        }
    }

    /// Replace the output detector chain.
    #[must_use]
    pub fn with_resolver(mut self, resolver: OutputResolver) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Build the backend command for a request without running it.
    pub fn plan(&self, request: &DownloadRequest) -> BackendPlan {
        CommandBuilder::new(self.backend, &self.settings).build(request)
    }

    /// Launch a download and return immediately.
    ///
    /// Must be called from within a tokio runtime. Dropping the returned
    /// handle detaches the run; it still completes in the background as
    /// long as the runtime is alive.
    pub fn download_url(&self, request: DownloadRequest) -> JoinHandle<DownloadReport> {
        let plan = self.plan(&request);
        log_plan(&plan);

        let handle = self.launcher.launch(CommandSpec::new(
            plan.program.clone(),
            plan.program.clone(),
            plan.args.clone(),
        ));
        let started_at = handle.started_at();

        let out_dir = self.settings.effective_out_dir();
        let resolver = Arc::clone(&self.resolver);
        let conversion = Arc::clone(&self.conversion);

        tokio::spawn(async move {
            let completed = handle.wait().await;
            if completed.exit.success() {
                info!(url = %request.url, "Download finished");
            } else {
                warn!(url = %request.url, exit = %completed.exit, "Download exited unsuccessfully");
            }

            let resolved = resolver.resolve(&ResolveContext {
                stderr: &completed.stderr,
                url: &request.url,
                requested_output: request.output.as_deref(),
                out_dir: &out_dir,
                started_at,
                exit: &completed.exit,
            });

            // Fall back to the requested path when nothing was detected.
            let output = resolved
                .as_ref()
                .map(|r| r.path.as_path())
                .or(request.output.as_deref());

            let conversion = conversion.maybe_convert(output, &completed.exit).outcome().await;

            DownloadReport {
                plan,
                exit: completed.exit,
                resolved,
                conversion,
            }
        })
    }
}

fn log_plan(plan: &BackendPlan) {
    match serde_json::to_string(plan) {
        Ok(json) => trace!("{json}"),
        Err(e) => trace!(error = %e, "Failed to serialize backend plan"),
    }
    trace!("{}", plan.command_line());
}
