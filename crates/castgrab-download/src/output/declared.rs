use super::{DetectionPhase, OutputDetector, ResolveContext};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

/// Phrase the backends print on the line before the file they write.
pub const DECLARED_PATH_MARKER: &str = "Writing output to";

static DECLARED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{DECLARED_PATH_MARKER}\s*\n\s*([^\n]+)"))
        .expect("declared path pattern is valid")
});

/// Extract the path printed on the line after [`DECLARED_PATH_MARKER`].
///
/// The result is trimmed and has not been checked against the filesystem.
pub fn declared_path(stderr: &str) -> Option<&str> {
    DECLARED_PATH
        .captures(stderr)?
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|path| !path.is_empty())
}

/// Trusts the backend's own report, but only if the file exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredPathDetector;

impl OutputDetector for DeclaredPathDetector {
    fn phase(&self) -> DetectionPhase {
        DetectionPhase::DeclaredPath
    }

    fn detect(&self, ctx: &ResolveContext<'_>) -> Option<PathBuf> {
        let candidate = PathBuf::from(declared_path(ctx.stderr)?);
        if candidate.exists() {
            debug!(path = %candidate.display(), "Declared output path verified");
            Some(candidate)
        } else {
            debug!(path = %candidate.display(), "Declared output path does not exist");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_on_following_line() {
        let stderr = "[cli][debug] OS: Linux\n[cli][info] Writing output to\n/srv/rec/someone/20240101-12345.ts\n[cli][debug] Checking file output\n";
        assert_eq!(
            declared_path(stderr),
            Some("/srv/rec/someone/20240101-12345.ts")
        );
    }

    #[test]
    fn test_path_is_trimmed() {
        let stderr = "Writing output to   \r\n   C:\\rec\\capture.ts  \r\n";
        assert_eq!(declared_path(stderr), Some("C:\\rec\\capture.ts"));
    }

    #[test]
    fn test_blank_lines_between_marker_and_path() {
        let stderr = "Writing output to\n\n   \n./capture.ts\n";
        assert_eq!(declared_path(stderr), Some("./capture.ts"));
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(declared_path("[download] Destination: capture.ts\n"), None);
        assert_eq!(declared_path(""), None);
    }

    #[test]
    fn test_marker_without_following_line() {
        assert_eq!(declared_path("Writing output to"), None);
        assert_eq!(declared_path("Writing output to\n"), None);
    }
}
