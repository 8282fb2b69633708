use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod commands;

use args::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Verify(args) => commands::verify(args, io::stdin().lock(), io::stdout().lock()),
        Command::Decode(args) => commands::decode(args, io::stdin().lock(), io::stdout().lock()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                commands::CliError::Token(idtoken::Error::InvalidToken(reason)) => {
                    tracing::warn!(reason = reason.code(), "token rejected");
                    eprintln!("rejected: {} ({})", reason.code(), reason);
                }
                _ => eprintln!("error: {e}"),
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "idtoken=debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
