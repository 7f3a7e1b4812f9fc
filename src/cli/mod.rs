//! Command-line interface.

pub mod check;
pub mod load;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;

/// Load declared secrets into AWS Secrets Manager.
#[derive(Parser, Debug)]
#[command(
    name = "load-secrets",
    about = "Interactively load declared secrets into AWS Secrets Manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the secret declarations
    #[arg(
        short,
        long,
        global = true,
        env = constants::CONFIG_ENV,
        default_value = constants::CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick secrets and write them interactively (default)
    Load {
        /// Do not echo entered values
        #[arg(long)]
        hide_input: bool,
    },

    /// Validate the config and list declared secrets without contacting AWS
    Check,
}

/// Execute a command. Defaults to `load`.
pub fn execute(command: Option<Command>, config: &std::path::Path) -> crate::error::Result<()> {
    match command.unwrap_or(Command::Load { hide_input: false }) {
        Command::Load { hide_input } => load::execute(config, hide_input),
        Command::Check => check::execute(config),
    }
}
