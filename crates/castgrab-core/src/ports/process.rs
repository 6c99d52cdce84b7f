//! Process launcher trait definition.
//!
//! This port defines the interface for launching the capture and transcode
//! subprocesses. A launch always yields a [`ProcessHandle`]; the only way to
//! observe what happened is to wait for its completion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;
use tokio::sync::oneshot;

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Label used to prefix forwarded output lines.
    pub label: String,
    /// Executable name or path.
    pub program: String,
    /// Ordered arguments.
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(label: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args,
        }
    }
}

/// How a process ended.
///
/// Both fields are absent when the process could not be spawned or the
/// platform reported neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitOutcome {
    pub code: Option<i32>,
    pub signal: Option<String>,
}

impl ExitOutcome {
    /// Outcome for a process that exited with `code`.
    pub const fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// Outcome for a process terminated by a signal.
    pub fn with_signal(signal: impl Into<String>) -> Self {
        Self {
            code: None,
            signal: Some(signal.into()),
        }
    }

    /// Outcome with neither code nor signal.
    pub const fn unknown() -> Self {
        Self {
            code: None,
            signal: None,
        }
    }

    /// Zero exit code, nothing else counts.
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal.as_deref()) {
            (Some(code), _) => write!(f, "code {code}"),
            (None, Some(signal)) => write!(f, "signal {signal}"),
            (None, None) => f.write_str("no exit code"),
        }
    }
}

/// Completion notification of a process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedProcess {
    pub exit: ExitOutcome,
    /// Everything the process wrote to stderr, verbatim.
    pub stderr: String,
}

#[derive(Debug)]
enum HandleState {
    Pending(oneshot::Receiver<CompletedProcess>),
    Finished(CompletedProcess),
}

/// Handle to one launched process.
///
/// Dropping the handle does not stop the process.
#[derive(Debug)]
pub struct ProcessHandle {
    label: String,
    pid: Option<u32>,
    started_at: SystemTime,
    state: HandleState,
}

impl ProcessHandle {
    /// Handle for a running process whose supervisor reports through `completion`.
    pub const fn pending(
        label: String,
        pid: Option<u32>,
        started_at: SystemTime,
        completion: oneshot::Receiver<CompletedProcess>,
    ) -> Self {
        Self {
            label,
            pid,
            started_at,
            state: HandleState::Pending(completion),
        }
    }

    /// Handle that is already complete, e.g. because spawning failed.
    pub const fn finished(label: String, started_at: SystemTime, completed: CompletedProcess) -> Self {
        Self {
            label,
            pid: None,
            started_at,
            state: HandleState::Finished(completed),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// When the launch was attempted. Recorded before spawning.
    pub const fn started_at(&self) -> SystemTime {
        self.started_at
    }

    /// Wait for the process to exit and its output streams to close.
    ///
    /// If the supervisor went away without reporting, the process is
    /// reported with no exit code and empty stderr.
    pub async fn wait(self) -> CompletedProcess {
        match self.state {
            HandleState::Finished(completed) => completed,
            HandleState::Pending(rx) => rx.await.unwrap_or_default(),
        }
    }
}

/// Launches subprocesses.
///
/// Implementations must not block; they hand back a handle immediately.
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, spec: CommandSpec) -> ProcessHandle;
}
