//! Tracing setup for the binary.
//!
//! Events go to stderr and to a daily rotating file under the castgrab log
//! directory. `RUST_LOG` overrides the default level.

use castgrab_core::log_dir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment name used as the log file prefix (`<env>.downloader`).
pub const LOG_ENV_VAR: &str = "CASTGRAB_ENV";

/// Prefix of the rotating log files.
pub fn log_file_prefix(env: Option<&str>) -> String {
    let env = env.map(str::trim).filter(|value| !value.is_empty()).unwrap_or("dev");
    format!("{env}.downloader")
}

/// Filter used when `RUST_LOG` is not set.
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install the global subscriber.
///
/// Returns the file writer guard; it must be held until the process exits
/// or buffered log lines are lost. `None` means file logging is disabled
/// because the log directory could not be prepared.
pub fn init_tracing(verbose: bool) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let file = match log_dir() {
        Ok(dir) => {
            let prefix = log_file_prefix(std::env::var(LOG_ENV_VAR).ok().as_deref());
            let appender = tracing_appender::rolling::daily(dir, prefix);
            Some(tracing_appender::non_blocking(appender))
        }
        Err(e) => {
            eprintln!("Failed to prepare log directory, logging to stderr only: {e}");
            None
        }
    };
    let (writer, guard) = file.unzip();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(writer.map(|writer| {
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false) // No ANSI colors in files
                .compact()
        }))
        .try_init()
        .ok(); // Ignore error if already initialized

    guard
}
