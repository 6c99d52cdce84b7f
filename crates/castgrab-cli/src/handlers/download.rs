//! Download command handler.

use std::fmt::Write as _;

use castgrab_download::{ConversionOutcome, DownloadReport, SkipReason};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::commands::RequestArgs;
use crate::error::CliError;

/// Run one download to completion, conversion included.
///
/// Returns the report even when the download failed; the caller decides the
/// exit code from it.
pub async fn execute(ctx: &CliContext, args: RequestArgs) -> Result<DownloadReport, CliError> {
    let request = args.into_request();
    info!(url = %request.url, backend = %ctx.downloader.backend(), "Starting download");

    let report = ctx
        .downloader
        .download_url(request)
        .await
        .map_err(|e| CliError::Internal(e.to_string()))?;

    println!("{}", summarize(&report));
    Ok(report)
}

/// Error to exit with, if the download itself failed.
pub fn failure(report: &DownloadReport) -> Option<CliError> {
    (!report.download_succeeded()).then(|| CliError::DownloadFailed(report.exit.to_string()))
}

/// Human-readable outcome, one fact per line.
pub fn summarize(report: &DownloadReport) -> String {
    let mut out = format!("download: {}", report.exit);

    match &report.resolved {
        Some(resolved) => {
            let _ = write!(out, "\noutput: {} ({:?})", resolved.path.display(), resolved.phase);
        }
        None => out.push_str("\noutput: not detected"),
    }

    match &report.conversion {
        ConversionOutcome::Finished { plan, exit } if exit.success() => {
            let _ = write!(out, "\nconverted: {}", plan.target.display());
        }
        ConversionOutcome::Finished { exit, .. } => {
            let _ = write!(out, "\nconversion failed: {exit}");
        }
        ConversionOutcome::Skipped(SkipReason::AlreadyTarget) => {
            out.push_str("\nconversion: not needed");
        }
        ConversionOutcome::Skipped(_) => out.push_str("\nconversion: skipped"),
    }
    out
}
