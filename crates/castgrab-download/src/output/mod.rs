//! Output file detection.
//!
//! Backends are unreliable about what they wrote: the declared path may be
//! missing, stale or wrong. Detection is therefore an ordered chain of
//! [`OutputDetector`]s, most trustworthy first, each of which either returns
//! a path verified on the filesystem or defers to the next one.
//!
//! The default chain is:
//!
//! 1. [`DeclaredPathDetector`] - the path the backend printed after
//!    `Writing output to`, if it exists
//! 2. [`DirectoryScanDetector`] - the newest file named after the URL's
//!    identifier and modified since the download started (successful
//!    downloads only)

mod declared;
mod identifier;
mod scan;

pub use declared::{DECLARED_PATH_MARKER, DeclaredPathDetector, declared_path};
pub use identifier::{contains_token, extract_identifier};
pub use scan::{DirectoryScanDetector, candidate_dirs, newest_match, scan_dirs};

use castgrab_core::ExitOutcome;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Everything a detector may look at.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Verbatim stderr of the download process.
    pub stderr: &'a str,
    /// Source URL of the request.
    pub url: &'a str,
    /// Output path the caller asked for, if any.
    pub requested_output: Option<&'a Path>,
    /// Configured output directory.
    pub out_dir: &'a Path,
    /// When the download process was launched.
    pub started_at: SystemTime,
    /// How the download process ended.
    pub exit: &'a ExitOutcome,
}

/// Which detector produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionPhase {
    DeclaredPath,
    DirectoryScan,
}

/// A file believed to be the downloaded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    pub path: PathBuf,
    pub phase: DetectionPhase,
}

/// One output detection strategy.
pub trait OutputDetector: Send + Sync {
    fn phase(&self) -> DetectionPhase;

    /// Return a path that exists, or `None` to defer to the next detector.
    fn detect(&self, ctx: &ResolveContext<'_>) -> Option<PathBuf>;
}

/// Runs detectors in order; the first verified path wins.
pub struct OutputResolver {
    detectors: Vec<Box<dyn OutputDetector>>,
}

impl OutputResolver {
    /// Create a resolver with a custom detector chain.
    pub fn new(detectors: Vec<Box<dyn OutputDetector>>) -> Self {
        Self { detectors }
    }

    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Option<ResolvedOutput> {
        self.detectors.iter().find_map(|detector| {
            detector.detect(ctx).map(|path| ResolvedOutput {
                path,
                phase: detector.phase(),
            })
        })
    }
}

impl Default for OutputResolver {
    fn default() -> Self {
        Self::new(vec![
            Box::new(DeclaredPathDetector),
            Box::new(DirectoryScanDetector),
        ])
    }
}
