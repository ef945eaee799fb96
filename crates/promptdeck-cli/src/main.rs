//! PromptDeck CLI
//!
//! Main entry point for the `promptdeck` binary.

use std::process::ExitCode;

use clap::Parser;
use promptdeck_cli::cli::Cli;
use promptdeck_cli::CliError;
use promptdeck_common_log::{LogConfig, LogLevel};

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    init_tracing(&cli);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start the async runtime: {err}");
            return Exit::GeneralError.into();
        }
    };

    let result = runtime.block_on(run(cli));
    // A blocking stdin read may still be parked.
    runtime.shutdown_background();

    match result {
        Ok(()) => Exit::Success.into(),
        Err(err) => {
            tracing::debug!(code = err.code(), "command failed");
            err.report(format);
            err.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config).await
}

fn init_tracing(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }

    if let Err(err) = promptdeck_common_log::init(config) {
        eprintln!("warning: {err}");
    }
}
