//! Structural validation of declared secret groups.
//!
//! Runs before anything is offered for selection; a failure ends the session.

use crate::core::domain::SecretGroup;
use crate::error::{ConfigError, Result};

/// Validate a name prefix.
///
/// A prefix must both start and end with `/`, so a lone `/` is accepted.
///
/// # Errors
///
/// Returns `ConfigError::InvalidNamePrefix` otherwise.
pub fn validate_name_prefix(prefix: &str) -> Result<()> {
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        return Err(ConfigError::InvalidNamePrefix {
            prefix: prefix.to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validate a whole group.
///
/// Checks:
/// - the name prefix starts and ends with `/`
/// - every secret has a name
/// - no secret replicates into the group's home region
///
/// Duplicate secret names are allowed; they address the same remote secret.
///
/// # Errors
///
/// Returns the first `ConfigError` found.
pub fn validate_group(group: &SecretGroup) -> Result<()> {
    validate_name_prefix(&group.name_prefix)?;

    for secret in &group.secrets {
        if secret.name.is_empty() {
            return Err(ConfigError::EmptySecretName {
                prefix: group.name_prefix.clone(),
            }
            .into());
        }

        if secret.replica_regions.iter().any(|r| r == &group.region) {
            return Err(ConfigError::ReplicaInHomeRegion {
                name: group.full_name(secret),
                region: group.region.clone(),
            }
            .into());
        }
    }

    Ok(())
}
