//! Configuration file management.
//!
//! Handles reading and validating the TOML file that declares secret groups.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::core::domain::SecretGroup;
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Declared secret groups plus session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Region used for the caller identity lookup.
    #[serde(default = "default_identity_region")]
    pub identity_region: String,
    #[serde(default, rename = "group")]
    pub groups: Vec<SecretGroup>,
}

fn default_identity_region() -> String {
    constants::DEFAULT_IDENTITY_REGION.to_string()
}

impl Config {
    /// Build a config directly from groups.
    pub fn new(groups: Vec<SecretGroup>) -> Self {
        Self {
            identity_region: default_identity_region(),
            groups,
        }
    }

    /// Load configuration from `path`.
    ///
    /// Parsing alone does not validate groups; the session validates the
    /// groups matching the caller's account, `validate` checks all of them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::ReadFile` if it can't be read, or `ConfigError::Parse`
    /// if the TOML is malformed or declares an unknown secret type.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = Self::from_toml(&contents)?;

        debug!(groups = config.groups.len(), "config loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Groups declared for `account`, in declaration order.
    pub fn groups_for_account(&self, account: &str) -> Vec<&SecretGroup> {
        self.groups
            .iter()
            .filter(|g| g.account_id == account)
            .collect()
    }

    /// Validate every declared group.
    pub fn validate(&self) -> Result<()> {
        self.groups.iter().try_for_each(validation::validate_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{Field, SecretKind};
    use crate::error::Error;

    const SAMPLE: &str = r#"
[[group]]
account_id = "123456789012"
region = "eu-west-1"
name_prefix = "/app/"
description = "Application"

[[group.secret]]
name = "db-password"
type = "string"
replica_regions = ["us-east-1"]

[[group.secret]]
name = "api"
type = "json"
fields = ["username", { key = "password", description = "API password", example = "hunter2" }]
tags = { Team = "platform" }

[[group]]
account_id = "210987654321"
region = "us-east-1"
name_prefix = "/other/"
"#;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml(SAMPLE).unwrap();

        assert_eq!(config.identity_region, "eu-west-1");
        assert_eq!(config.groups.len(), 2);

        let group = &config.groups[0];
        assert_eq!(group.name_prefix, "/app/");
        assert_eq!(group.secrets.len(), 2);
        assert_eq!(group.secrets[0].kind, SecretKind::String);
        assert_eq!(group.secrets[0].replica_regions, vec!["us-east-1"]);

        match &group.secrets[1].kind {
            SecretKind::Json { fields } => {
                assert_eq!(fields[0], Field::from("username"));
                assert_eq!(fields[1].key(), "password");
                assert_eq!(fields[1].example(), Some("hunter2"));
            }
            other => panic!("expected json secret, got {:?}", other),
        }
        assert_eq!(
            group.secrets[1].tags.get("Team").map(String::as_str),
            Some("platform")
        );

        assert!(config.groups[1].secrets.is_empty());
    }

    #[test]
    fn test_unknown_secret_type_is_rejected() {
        let toml = r#"
[[group]]
account_id = "1"
region = "eu-west-1"
name_prefix = "/app/"

[[group.secret]]
name = "blob"
type = "binary"
"#;
        assert!(matches!(
            Config::from_toml(toml),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_groups_for_account() {
        let config = Config::from_toml(SAMPLE).unwrap();

        let matched = config.groups_for_account("210987654321");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name_prefix, "/other/");
        assert!(config.groups_for_account("000000000000").is_empty());
    }

    #[test]
    fn test_identity_region_override() {
        let config = Config::from_toml("identity_region = \"us-west-2\"\n").unwrap();
        assert_eq!(config.identity_region, "us-west-2");
        assert!(config.groups.is_empty());
    }

    #[test]
    fn test_misspelled_replica_key_is_rejected() {
        let toml = SAMPLE.replace("replica_regions =", "replica_region =");
        assert!(matches!(
            Config::from_toml(&toml),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_unknown_group_key_is_rejected() {
        let toml = SAMPLE.replace("region = \"us-east-1\"", "regoin = \"us-east-1\"");
        assert!(Config::from_toml(&toml).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(&path),
            Err(Error::Config(ConfigError::NotFound(_)))
        ));
    }

    #[test]
    fn test_validate_reports_bad_prefix() {
        let config = Config::from_toml(&SAMPLE.replace("/other/", "other")).unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidNamePrefix { .. }))
        ));
    }
}
