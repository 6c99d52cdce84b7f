use castgrab_core::ExitOutcome;
use std::process::ExitStatus;

/// Map an OS exit status to an [`ExitOutcome`].
///
/// On Unix a signal-terminated process reports the signal name
/// (`SIGTERM`), or the raw number if it is not a known signal.
pub fn exit_outcome(status: ExitStatus) -> ExitOutcome {
    if let Some(code) = status.code() {
        return ExitOutcome::with_code(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(raw) = status.signal() {
            return ExitOutcome::with_signal(signal_name(raw));
        }
    }

    ExitOutcome::unknown()
}

#[cfg(unix)]
fn signal_name(raw: i32) -> String {
    nix::sys::signal::Signal::try_from(raw)
        .map_or_else(|_| raw.to_string(), |signal| signal.as_str().to_string())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;

    fn run_sh(script: &str) -> ExitStatus {
        Command::new("sh").arg("-c").arg(script).status().unwrap()
    }

    #[test]
    fn test_exit_code_is_reported() {
        assert_eq!(exit_outcome(run_sh("exit 0")), ExitOutcome::with_code(0));
        assert_eq!(exit_outcome(run_sh("exit 3")), ExitOutcome::with_code(3));
    }

    #[test]
    fn test_signal_is_reported_by_name() {
        let outcome = exit_outcome(run_sh("kill -TERM $$"));
        assert_eq!(outcome, ExitOutcome::with_signal("SIGTERM"));
        assert!(!outcome.success());
    }

    #[test]
    fn test_unknown_signal_number_falls_back_to_raw() {
        assert_eq!(signal_name(200), "200");
    }
}
