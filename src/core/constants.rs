//! Constants used throughout load-secrets.
//!
//! Centralizes magic strings and configuration values.

/// Default configuration file name.
pub const CONFIG_FILE: &str = "secrets.toml";

/// Environment variable that overrides the configuration path.
pub const CONFIG_ENV: &str = "LOAD_SECRETS_CONFIG";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "LOAD_SECRETS_LOG";

/// Region used for the caller identity lookup when none is configured.
pub const DEFAULT_IDENTITY_REGION: &str = "eu-west-1";

/// Key of the provenance tag attached to every managed secret.
pub const PROVENANCE_TAG_KEY: &str = "Source";

/// Value of the provenance tag attached to every managed secret.
pub const PROVENANCE_TAG_VALUE: &str = "load-secrets script";

/// Description given to secrets this tool creates.
pub const CREATED_DESCRIPTION: &str = "Created by load-secrets";

/// Prompt shown while collecting a value.
pub const VALUE_PROMPT: &str = "Enter value (Ctrl+C to abort)";

/// Prompt shown by the selection loop.
pub const INDEX_PROMPT: &str = "Enter index (or enter to quit)";
