//! load-secrets - interactively load declared secrets into AWS Secrets Manager.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use load_secrets::cli::output;
use load_secrets::cli::{execute, Cli};
use load_secrets::core::constants;
use load_secrets::error::{ConfigError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("load_secrets=debug")
        } else {
            EnvFilter::new("load_secrets=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    if let Err(e) = execute(cli.command, &cli.config) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => {
                Some("pass --config or set LOAD_SECRETS_CONFIG")
            }
            Error::Store(StoreError::Identity(_)) => {
                Some("make sure you have valid AWS credentials active")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
