//! Load command - the interactive session against AWS.

use std::path::Path;

use crate::cli::output::Console;
use crate::cli::prompt::Terminal;
use crate::core::config::Config;
use crate::core::session::Session;
use crate::core::store::AwsConnector;
use crate::error::Result;

/// Run the interactive session for the config at `path`.
pub fn execute(path: &Path, hide_input: bool) -> Result<()> {
    let config = Config::load(path)?;

    let connector = AwsConnector::new()?;
    let identity = connector.identity(&config.identity_region);
    let mut prompt = Terminal::new();
    let reporter = Console;

    Session::new(connector, &identity, &mut prompt, &reporter)
        .silent(hide_input)
        .run(&config)?;

    Ok(())
}
