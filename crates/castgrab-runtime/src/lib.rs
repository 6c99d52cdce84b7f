//! Process runtime for castgrab.
//!
//! Implements the [`ProcessLauncher`](castgrab_core::ProcessLauncher) port on
//! top of `tokio::process`, forwarding subprocess output to a
//! [`ProcessLogSink`](castgrab_core::ProcessLogSink).

pub mod process;

pub use process::{Invocation, SubprocessLauncher, TracingLogSink, exit_outcome, resolve_invocation};
