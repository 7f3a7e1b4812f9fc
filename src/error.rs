//! Error types.
//!
//! Absence of a remote secret and operator cancellation are not errors; they
//! are modeled as `Option` and `Answer::Cancelled` respectively. Everything
//! here ends either the current reconciliation attempt (`Contract`) or the
//! whole session.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to serialize value: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with the declared secret groups. Always fatal, and always raised
/// before any remote mutation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("namePrefix should start and end with /. Current value: {prefix}")]
    InvalidNamePrefix { prefix: String },

    #[error("secret in group {prefix} has an empty name")]
    EmptySecretName { prefix: String },

    #[error("{name}: replica region {region} is the secret's home region")]
    ReplicaInHomeRegion { name: String, region: String },
}

/// Failures talking to the store or identity service.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{operation} failed for {name}: {message}")]
    Transport {
        operation: &'static str,
        name: String,
        message: String,
    },

    #[error("failed to resolve caller identity: {0}")]
    Identity(String),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl StoreError {
    /// Build a transport error for `operation` on the secret `name`.
    pub fn transport(operation: &'static str, name: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            name: name.to_string(),
            message: message.into(),
        }
    }
}

/// The store answered, but not in the shape we rely on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("expected a version id after writing {0}")]
    MissingVersionId(String),

    #[error("missing SecretString for {0} (is it a binary?)")]
    BinaryValue(String),

    #[error("caller identity did not include an account id")]
    MissingAccount,
}

pub type Result<T> = std::result::Result<T, Error>;
