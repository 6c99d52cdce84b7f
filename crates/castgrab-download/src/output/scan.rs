use super::identifier::{contains_token, extract_identifier};
use super::{DetectionPhase, OutputDetector, ResolveContext};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Finds the output by listing the output directories.
///
/// Only runs for successful downloads. A file qualifies when its name holds
/// the URL identifier as a token and it was modified at or after the
/// download started, which rules out older captures of the same stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanDetector;

impl OutputDetector for DirectoryScanDetector {
    fn phase(&self) -> DetectionPhase {
        DetectionPhase::DirectoryScan
    }

    fn detect(&self, ctx: &ResolveContext<'_>) -> Option<PathBuf> {
        if !ctx.exit.success() {
            debug!(exit = %ctx.exit, "Skipping output scan for failed download");
            return None;
        }

        let Some(id) = extract_identifier(ctx.url) else {
            debug!(url = %ctx.url, "No identifier in URL, cannot scan for output");
            return None;
        };

        let found = scan_dirs(&candidate_dirs(ctx.out_dir, ctx.requested_output), id, ctx.started_at);

        if let Some(path) = &found {
            info!("Detected output file by file search: {}", path.display());
        }
        found
    }
}

/// Directories to scan, in order: the output directory, then the parent of
/// the requested output path. Missing directories and duplicates are dropped.
pub fn candidate_dirs(out_dir: &Path, requested_output: Option<&Path>) -> Vec<PathBuf> {
    let requested_dir = requested_output.map(|path| match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    });

    let mut dirs: Vec<PathBuf> = Vec::with_capacity(2);
    for dir in std::iter::once(out_dir.to_path_buf()).chain(requested_dir) {
        if dir.is_dir() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Scan `dirs` in order; the first directory with a qualifying file wins.
pub fn scan_dirs(dirs: &[PathBuf], id: &str, started_at: SystemTime) -> Option<PathBuf> {
    dirs.iter().find_map(|dir| newest_match(dir, id, started_at))
}

/// The most recently modified qualifying file in `dir`.
///
/// Entries that cannot be stat'ed are skipped. A directory that cannot be
/// listed yields `None`.
pub fn newest_match(dir: &Path, id: &str, started_at: SystemTime) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Error searching for output file in {}: {e}", dir.display());
            return None;
        }
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| contains_token(&entry.file_name().to_string_lossy(), id))
        .filter_map(|entry| {
            let path = entry.path();
            let metadata = fs::metadata(&path).ok()?;
            let modified = metadata.modified().ok()?;
            (metadata.is_file() && modified >= started_at).then_some((path, modified))
        })
        .max_by_key(|(_, modified)| *modified)
        .map(|(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use castgrab_core::ExitOutcome;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(path: &Path, modified: SystemTime) {
        let file = File::create(path).unwrap();
        file.set_modified(modified).unwrap();
    }

    fn scan(url: &str, out_dir: &Path, requested: Option<&Path>, started_at: SystemTime) -> Option<PathBuf> {
        let exit = ExitOutcome::with_code(0);
        DirectoryScanDetector.detect(&ResolveContext {
            stderr: "",
            url,
            requested_output: requested,
            out_dir,
            started_at,
            exit: &exit,
        })
    }

    #[test]
    fn test_single_qualifying_file() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(10);
        let expected = dir.path().join("someone-12345.ts");
        touch(&expected, SystemTime::now());
        touch(&dir.path().join("unrelated.ts"), SystemTime::now());

        assert_eq!(
            scan("https://site/movie/12345", dir.path(), None, started_at),
            Some(expected)
        );
    }

    #[test]
    fn test_newest_of_two_wins() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(100);
        let older = dir.path().join("12345-part1.ts");
        let newer = dir.path().join("12345-part2.ts");
        touch(&newer, started_at + Duration::from_secs(50));
        touch(&older, started_at + Duration::from_secs(10));

        assert_eq!(newest_match(dir.path(), "12345", started_at), Some(newer));
    }

    #[test]
    fn test_stale_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now();
        touch(&dir.path().join("12345.ts"), started_at - Duration::from_secs(3600));

        assert_eq!(newest_match(dir.path(), "12345", started_at), None);
    }

    #[test]
    fn test_mtime_equal_to_start_qualifies() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(5);
        let file = dir.path().join("12345.ts");
        touch(&file, started_at);

        assert_eq!(newest_match(dir.path(), "12345", started_at), Some(file));
    }

    #[test]
    fn test_directories_do_not_qualify() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(5);
        fs::create_dir(dir.path().join("12345")).unwrap();

        assert_eq!(newest_match(dir.path(), "12345", started_at), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_unstatable_candidate_is_skipped() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(5);
        std::os::unix::fs::symlink(dir.path().join("gone.ts"), dir.path().join("12345.ts")).unwrap();
        let real = dir.path().join("rec-12345.ts");
        touch(&real, SystemTime::now());

        assert_eq!(newest_match(dir.path(), "12345", started_at), Some(real));
    }

    #[test]
    fn test_unlistable_directory_is_skipped() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(5);
        // A regular file where a directory is expected cannot be listed.
        let not_a_dir = dir.path().join("12345.ts");
        touch(&not_a_dir, SystemTime::now());
        assert_eq!(newest_match(&not_a_dir, "12345", started_at), None);

        let second = TempDir::new().unwrap();
        let expected = second.path().join("12345.mp4");
        touch(&expected, SystemTime::now());

        let dirs = [not_a_dir, second.path().to_path_buf()];
        assert_eq!(scan_dirs(&dirs, "12345", started_at), Some(expected));
    }

    #[test]
    fn test_identifier_must_be_a_token() {
        let dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(5);
        touch(&dir.path().join("9123456.ts"), SystemTime::now());

        assert_eq!(newest_match(dir.path(), "12345", started_at), None);
    }

    #[test]
    fn test_out_dir_scanned_before_requested_dir() {
        let out_dir = TempDir::new().unwrap();
        let requested_dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(100);

        let in_out_dir = out_dir.path().join("a-12345.ts");
        touch(&in_out_dir, started_at + Duration::from_secs(1));
        // Newer, but in the second directory.
        touch(&requested_dir.path().join("b-12345.ts"), started_at + Duration::from_secs(90));

        let requested = requested_dir.path().join("capture.ts");
        assert_eq!(
            scan("https://site/12345", out_dir.path(), Some(&requested), started_at),
            Some(in_out_dir)
        );
    }

    #[test]
    fn test_falls_through_to_requested_dir() {
        let out_dir = TempDir::new().unwrap();
        let requested_dir = TempDir::new().unwrap();
        let started_at = SystemTime::now() - Duration::from_secs(100);
        let expected = requested_dir.path().join("abc-def.mkv");
        touch(&expected, SystemTime::now());

        let requested = requested_dir.path().join("abc-def.%(ext)s");
        assert_eq!(
            scan("https://site/abc-def", out_dir.path(), Some(&requested), started_at),
            Some(expected)
        );
    }

    #[test]
    fn test_failed_download_is_not_scanned() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("12345.ts"), SystemTime::now());
        let exit = ExitOutcome::with_code(2);

        let found = DirectoryScanDetector.detect(&ResolveContext {
            stderr: "",
            url: "https://site/12345",
            requested_output: None,
            out_dir: dir.path(),
            started_at: SystemTime::now() - Duration::from_secs(60),
            exit: &exit,
        });
        assert_eq!(found, None);
    }

    #[test]
    fn test_url_without_identifier_fails() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("12345.ts"), SystemTime::now());
        assert_eq!(
            scan("https://site/", dir.path(), None, SystemTime::now() - Duration::from_secs(60)),
            None
        );
    }

    #[test]
    fn test_candidate_dirs_dedup_and_missing() {
        let dir = TempDir::new().unwrap();
        let same = dir.path().join("capture.ts");
        assert_eq!(candidate_dirs(dir.path(), Some(&same)), vec![dir.path().to_path_buf()]);

        let missing = dir.path().join("nope");
        assert_eq!(
            candidate_dirs(&missing, Some(&missing.join("capture.ts"))),
            Vec::<PathBuf>::new()
        );
    }

    #[test]
    fn test_candidate_dirs_bare_file_name_means_current_dir() {
        let dirs = candidate_dirs(Path::new("/definitely/not/here"), Some(Path::new("capture.ts")));
        assert_eq!(dirs, vec![PathBuf::from(".")]);
    }
}
