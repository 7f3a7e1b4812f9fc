//! Check command.
//!
//! Offline: loads and validates the config, then lists every group with the
//! full names its secrets resolve to. Makes no remote calls.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::domain::SecretKind;
use crate::error::Result;

/// Validate the config at `path` and print what it declares.
pub fn execute(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    config.validate()?;
    info!(groups = config.groups.len(), "config is valid");

    for group in &config.groups {
        let title = if group.description.is_empty() {
            group.name_prefix.clone()
        } else {
            format!("{} (prefix: {})", group.description, group.name_prefix)
        };
        output::section(&title);
        output::kv("account:", &group.account_id);
        output::kv("region: ", &group.region);

        if group.secrets.is_empty() {
            output::list_item("no secrets declared");
            continue;
        }
        for secret in &group.secrets {
            let kind = match &secret.kind {
                SecretKind::String => "string".to_string(),
                SecretKind::Json { fields } => format!("json, {} fields", fields.len()),
            };
            let replicas = if secret.replica_regions.is_empty() {
                String::new()
            } else {
                format!(" replicas: {}", secret.replica_regions.join(", "))
            };
            output::list_item(&format!(
                "{} ({}){}",
                output::name(&group.full_name(secret)),
                kind,
                replicas
            ));
        }
    }

    println!();
    let count: usize = config.groups.iter().map(|g| g.secrets.len()).sum();
    output::success(&format!(
        "{} group{} valid, {} secret{} declared",
        config.groups.len(),
        if config.groups.len() == 1 { "" } else { "s" },
        count,
        if count == 1 { "" } else { "s" }
    ));

    Ok(())
}
