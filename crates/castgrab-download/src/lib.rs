//! Download orchestration for castgrab.
//!
//! One request flows through four stages:
//!
//! - `command` - pick the backend and build its argument vector
//! - process launch through the [`ProcessLauncher`](castgrab_core::ProcessLauncher) port
//! - `output` - work out which file the backend actually wrote
//! - `conversion` - remux it into the target container when needed
//!
//! [`Downloader`] wires the stages together and runs them on a spawned task
//! so the caller never blocks on a subprocess.

mod command;
mod conversion;
mod downloader;
pub mod output;

pub use command::{CommandBuilder, STREAMLINK_OUTPUT_TEMPLATE, STREAMLINK_QUALITY, defines_output};
pub use conversion::{
    ConversionOutcome, ConversionPipeline, ConversionPlan, ConversionTask, FFMPEG_LABEL, SkipReason,
    target_path,
};
pub use downloader::{DownloadReport, Downloader};
pub use output::{DetectionPhase, OutputDetector, OutputResolver, ResolveContext, ResolvedOutput};
