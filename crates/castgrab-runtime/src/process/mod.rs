//! Subprocess supervision.
//!
//! # Structure
//!
//! - `SubprocessLauncher` - spawns a child and supervises it until completion
//! - `resolve_invocation` - command interpreter indirection (Windows)
//! - `spawn_stream_reader` - lossy line reader forwarding to the log sink
//! - `exit_outcome` - `ExitStatus` to `ExitOutcome` mapping with signal names
//! - `TracingLogSink` - default sink writing `tracing` debug events

mod command;
mod exit;
mod sink;
mod stream;
mod supervisor;

pub use command::{Invocation, resolve_invocation};
pub use exit::exit_outcome;
pub use sink::TracingLogSink;
pub(crate) use stream::spawn_stream_reader;
pub use supervisor::SubprocessLauncher;
