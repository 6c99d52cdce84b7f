//! Command construction with platform interpreter indirection.
//!
//! On Windows the backends are usually installed as `.cmd`/`.bat` shims, so
//! the program is run through the command interpreter named by `COMSPEC`.
//! Elsewhere the program is executed directly.

use castgrab_core::CommandSpec;
use std::process::Stdio;
use tokio::process::Command;

/// Environment variable naming the Windows command interpreter.
#[cfg(windows)]
const COMSPEC_ENV_VAR: &str = "COMSPEC";

#[cfg(windows)]
const DEFAULT_COMSPEC: &str = "cmd.exe";

/// Program and arguments actually handed to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Resolve how `spec` is invoked.
///
/// With an interpreter the result is `<interpreter> /c <program> <args...>`.
pub fn resolve_invocation(spec: &CommandSpec, interpreter: Option<&str>) -> Invocation {
    match interpreter {
        Some(shell) => Invocation {
            program: shell.to_string(),
            args: ["/c", spec.program.as_str()]
                .into_iter()
                .map(String::from)
                .chain(spec.args.iter().cloned())
                .collect(),
        },
        None => Invocation {
            program: spec.program.clone(),
            args: spec.args.clone(),
        },
    }
}

/// Interpreter required on this platform, if any.
#[cfg(windows)]
pub(crate) fn platform_interpreter() -> Option<String> {
    Some(std::env::var(COMSPEC_ENV_VAR).unwrap_or_else(|_| DEFAULT_COMSPEC.to_string()))
}

/// Interpreter required on this platform, if any.
#[cfg(not(windows))]
pub(crate) const fn platform_interpreter() -> Option<String> {
    None
}

/// Build a tokio command with piped output streams.
///
/// The child is not killed when its handle is dropped, so it can outlive
/// the orchestrating process.
pub(crate) fn build_command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> CommandSpec {
        CommandSpec::new(
            "yt-dlp",
            "yt-dlp",
            vec!["--output".to_string(), "a b.ts".to_string()],
        )
    }

    #[test]
    fn test_direct_invocation() {
        let invocation = resolve_invocation(&spec(), None);
        assert_eq!(invocation.program, "yt-dlp");
        assert_eq!(invocation.args, vec!["--output", "a b.ts"]);
    }

    #[test]
    fn test_interpreter_invocation() {
        let invocation = resolve_invocation(&spec(), Some("C:\\Windows\\system32\\cmd.exe"));
        assert_eq!(invocation.program, "C:\\Windows\\system32\\cmd.exe");
        assert_eq!(invocation.args, vec!["/c", "yt-dlp", "--output", "a b.ts"]);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_no_interpreter_off_windows() {
        assert_eq!(platform_interpreter(), None);
    }
}
