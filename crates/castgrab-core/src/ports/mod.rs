//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the download pipeline expects from
//! infrastructure. They contain no process or filesystem implementation
//! details.
//!
//! # Design Rules
//!
//! - Launching never fails loudly: spawn errors surface as a completed
//!   handle with no exit code
//! - Sinks are synchronous and must not block

pub mod log_sink;
pub mod process;

pub use log_sink::{ProcessLogSink, StreamKind};
pub use process::{CommandSpec, CompletedProcess, ExitOutcome, ProcessHandle, ProcessLauncher};
