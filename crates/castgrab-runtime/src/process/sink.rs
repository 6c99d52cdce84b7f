use castgrab_core::{ProcessLogSink, StreamKind};
use tracing::debug;

/// Log sink that writes subprocess output as `tracing` debug events.
///
/// Lines are rendered as `<label> <stream>: <line>` so transcode output is
/// distinguishable from capture output in the log file.
#[derive(Debug, Clone, Default)]
pub struct TracingLogSink;

impl ProcessLogSink for TracingLogSink {
    fn append(&self, label: &str, stream: StreamKind, line: &str) {
        debug!(target: "castgrab::process", %label, %stream, "{label} {stream}: {line}");
    }
}
