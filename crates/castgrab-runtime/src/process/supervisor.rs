//! Subprocess launching and supervision.
//!
//! Each launch spawns one supervisor task that owns the child, drains both
//! output streams, waits for exit and then reports a
//! [`CompletedProcess`] through a oneshot channel. Nothing here blocks the
//! caller.

use super::command::{build_command, platform_interpreter, resolve_invocation};
use super::exit::exit_outcome;
use super::spawn_stream_reader;
use castgrab_core::{
    CommandSpec, CompletedProcess, ExitOutcome, ProcessHandle, ProcessLauncher, ProcessLogSink,
    StreamKind,
};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::process::Child;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// [`ProcessLauncher`] backed by `tokio::process`.
///
/// Must be used from within a tokio runtime.
pub struct SubprocessLauncher {
    sink: Arc<dyn ProcessLogSink>,
    interpreter: Option<String>,
}

impl SubprocessLauncher {
    /// Create a launcher using this platform's interpreter rules.
    pub fn new(sink: Arc<dyn ProcessLogSink>) -> Self {
        Self {
            sink,
            interpreter: platform_interpreter(),
        }
    }

    /// Override the command interpreter (`None` runs programs directly).
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: Option<String>) -> Self {
        self.interpreter = interpreter;
        self
    }
}

impl ProcessLauncher for SubprocessLauncher {
    fn launch(&self, spec: CommandSpec) -> ProcessHandle {
        let invocation = resolve_invocation(&spec, self.interpreter.as_deref());
        let started_at = SystemTime::now();

        let child = match build_command(&invocation).spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(label = %spec.label, program = %invocation.program, error = %e, "Failed to spawn process");
                let completed = CompletedProcess {
                    exit: ExitOutcome::unknown(),
                    stderr: format!("failed to spawn {}: {e}\n", invocation.program),
                };
                return ProcessHandle::finished(spec.label, started_at, completed);
            }
        };

        let pid = child.id();
        debug!(label = %spec.label, pid = ?pid, "Process spawned");

        let (tx, rx) = oneshot::channel();
        tokio::spawn(supervise(
            child,
            Arc::from(spec.label.as_str()),
            Arc::clone(&self.sink),
            tx,
        ));

        ProcessHandle::pending(spec.label, pid, started_at, rx)
    }
}

async fn supervise(
    mut child: Child,
    label: Arc<str>,
    sink: Arc<dyn ProcessLogSink>,
    tx: oneshot::Sender<CompletedProcess>,
) {
    let stdout_task = child.stdout.take().map(|stdout| {
        spawn_stream_reader(stdout, Arc::clone(&label), StreamKind::Stdout, Arc::clone(&sink), false)
    });
    let stderr_task = child.stderr.take().map(|stderr| {
        spawn_stream_reader(stderr, Arc::clone(&label), StreamKind::Stderr, Arc::clone(&sink), true)
    });

    let exit = match child.wait().await {
        Ok(status) => exit_outcome(status),
        Err(e) => {
            warn!(%label, error = %e, "Failed to wait for process");
            ExitOutcome::unknown()
        }
    };

    // Completion only fires once both streams have closed.
    if let Some(task) = stdout_task {
        let _ = task.await;
    }
    let stderr = match stderr_task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    };

    debug!(%label, %exit, "Process completed");

    // Receiver may have been dropped; the process result is then unobserved.
    let _ = tx.send(CompletedProcess { exit, stderr });
}
