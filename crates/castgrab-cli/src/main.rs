//! CLI entry point - the composition root.
//!
//! Parses arguments, installs tracing, bootstraps the `CliContext` and
//! dispatches to a handler.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use castgrab_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let mut cli = Cli::parse();

    // Held until exit so buffered file log lines are flushed
    let _log_guard = init_tracing(cli.verbose);

    let Some(command) = cli.command.take() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    // Paths needs no settings
    if let Commands::Paths = command {
        handlers::paths::execute(cli.config.as_deref())?;
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = match bootstrap(CliConfig::from_cli(&cli)) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(fail(&e)),
    };

    match command {
        Commands::Download { request } => match handlers::download::execute(&ctx, request).await {
            Ok(report) => {
                if let Some(e) = handlers::download::failure(&report) {
                    return Ok(fail(&e));
                }
            }
            Err(e) => return Ok(fail(&e)),
        },
        Commands::Plan { request, json } => {
            handlers::plan::execute(&ctx, request, json)?;
        }
        Commands::Paths => {} // handled above
    }

    Ok(ExitCode::SUCCESS)
}

fn fail(err: &CliError) -> ExitCode {
    eprintln!("{err}");
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

