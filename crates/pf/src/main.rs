use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{LocalCommand, LocalDispatch, PostsCommand, PostsDispatch};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                let rendered = serde_json::to_string_pretty(&error_json)
                    .unwrap_or_else(|_| error_json.to_string());
                eprintln!("{rendered}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v` / `-q` flags.
fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "info,pf=debug,post_filter_rs=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);

    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    match PostsDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx).await,
        None => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::UnknownTag { .. } => "UNKNOWN_TAG",
        CommandError::UnknownCommand(_) => "UNKNOWN_COMMAND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Config(_) => 5,
        CommandError::UnknownTag { .. } => 1,
        CommandError::UnknownCommand(_) => 1,
        CommandError::Store(_) => 3,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}
