use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and validate Firebase ID tokens
#[derive(Parser, Debug)]
#[command(name = "idtoken", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a token's exp, iat, iss and aud claims for a project
    Verify(VerifyArgs),

    /// Print a token's header and claims without validating them
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Compact token; read from stdin when omitted
    pub token: Option<String>,

    /// Trusted Firebase project id
    #[arg(long, short = 'p')]
    pub project_id: Option<String>,

    /// Service account JSON to take the project id from
    #[arg(long, conflicts_with = "project_id")]
    pub credentials: Option<PathBuf>,

    /// Validate as of this Unix timestamp instead of the system clock
    #[arg(long, allow_negative_numbers = true)]
    pub now: Option<i64>,

    /// Print claims as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Compact token; read from stdin when omitted
    pub token: Option<String>,

    /// Print claims as JSON
    #[arg(long)]
    pub json: bool,
}
