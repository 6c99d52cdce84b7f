//! Async stream line readers (non-UTF8-safe).
//!
//! Capture tools can emit non-UTF8 bytes (file names, progress bars).
//! `BufReader::lines()` would terminate the reader on invalid UTF-8, so
//! lines are read as bytes and decoded lossily.
//!
//! Progress output is redrawn with bare `\r`, so a carriage return ends a
//! forwarded line just like `\n` does.

use castgrab_core::{ProcessLogSink, StreamKind};
use std::sync::Arc;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawn a task forwarding every line of `stream` to `sink`.
///
/// Lines are trimmed and empty ones are dropped before forwarding. When
/// `capture` is set the task also returns everything it read, verbatim.
pub fn spawn_stream_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    label: Arc<str>,
    kind: StreamKind,
    sink: Arc<dyn ProcessLogSink>,
    capture: bool,
) -> JoinHandle<String> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        let mut captured = String::new();

        loop {
            buf.clear();
            match read_segment(&mut reader, &mut buf).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let chunk = String::from_utf8_lossy(&buf);
                    if capture {
                        captured.push_str(&chunk);
                    }
                    forward_line(sink.as_ref(), &label, kind, &chunk);
                }
                Err(e) => {
                    debug!(%label, stream = %kind, error = %e, "stream reader exiting due to read error");
                    break;
                }
            }
        }

        debug!(%label, stream = %kind, "stream reader task exiting");
        captured
    })
}

/// Read up to and including the next `\n` or `\r`, or to EOF.
///
/// Returns the number of bytes appended to `buf`; 0 means EOF.
async fn read_segment<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut read = 0;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(read);
        }

        let (complete, used) = match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => (true, i + 1),
            None => (false, available.len()),
        };
        buf.extend_from_slice(&available[..used]);
        reader.consume(used);
        read += used;

        if complete {
            return Ok(read);
        }
    }
}

fn forward_line(sink: &dyn ProcessLogSink, label: &str, kind: StreamKind, raw: &str) {
    let line = raw.trim();
    if !line.is_empty() {
        sink.append(label, kind, line);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_lines_are_trimmed_and_blank_lines_dropped() {
        let input: &[u8] = b"  first line  \n\n   \r\nsecond\r\nlast without newline";
        let sink = Arc::new(RecordingSink::default());

        let captured = spawn_stream_reader(input, Arc::from("yt-dlp"), StreamKind::Stdout, sink.clone(), false)
            .await
            .unwrap();

        assert!(captured.is_empty());
        assert_eq!(
            sink.lines_for(StreamKind::Stdout),
            vec!["first line", "second", "last without newline"]
        );
    }

    #[tokio::test]
    async fn test_capture_is_verbatim() {
        let input: &[u8] = b"[download] Writing output to\n  /tmp/out.ts  \n";
        let sink = Arc::new(RecordingSink::default());

        let captured = spawn_stream_reader(input, Arc::from("streamlink"), StreamKind::Stderr, sink.clone(), true)
            .await
            .unwrap();

        assert_eq!(captured, "[download] Writing output to\n  /tmp/out.ts  \n");
        assert_eq!(sink.lines_for(StreamKind::Stderr).len(), 2);
    }

    #[tokio::test]
    async fn test_carriage_returns_split_progress_updates() {
        let input: &[u8] = b"[download]  10.0%\r[download]  20.0%\r[download]  30.0%\r";
        let sink = Arc::new(RecordingSink::default());

        let captured = spawn_stream_reader(input, Arc::from("yt-dlp"), StreamKind::Stderr, sink.clone(), true)
            .await
            .unwrap();

        assert_eq!(
            sink.lines_for(StreamKind::Stderr),
            vec!["[download]  10.0%", "[download]  20.0%", "[download]  30.0%"]
        );
        assert_eq!(captured, "[download]  10.0%\r[download]  20.0%\r[download]  30.0%\r");
    }

    #[tokio::test]
    async fn test_progress_is_forwarded_before_stream_closes() {
        let (mut writer, reader) = tokio::io::duplex(64);
        let sink = Arc::new(RecordingSink::default());
        let task = spawn_stream_reader(reader, Arc::from("ffmpeg"), StreamKind::Stderr, sink.clone(), false);

        writer.write_all(b"frame=  100\r").await.unwrap();

        let mut waited = Duration::ZERO;
        while sink.lines_for(StreamKind::Stderr).is_empty() && waited < Duration::from_secs(5) {
            tokio::time::sleep(Duration::from_millis(10)).await;
            waited += Duration::from_millis(10);
        }
        assert_eq!(sink.lines_for(StreamKind::Stderr), vec!["frame=  100"]);

        drop(writer);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_utf8_does_not_stop_reader() {
        let input: &[u8] = b"bad \xff byte\nnext\n";
        let sink = Arc::new(RecordingSink::default());

        spawn_stream_reader(input, Arc::from("ffmpeg"), StreamKind::Stderr, sink.clone(), false)
            .await
            .unwrap();

        let lines = sink.lines_for(StreamKind::Stderr);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "next");
    }
}
