//! Remote secret store and identity collaborators.
//!
//! The core talks to the store only through these traits, one `SecretStore`
//! per region. Calls are blocking and issued strictly one at a time.
//!
//! ## Adding a New Store Backend
//!
//! 1. Implement `SecretStore` for a per-region client
//! 2. Implement `Connector` to build it for a region
//! 3. Re-export from this module

use std::collections::HashMap;

use tracing::debug;

use crate::core::domain::{RemoteState, Tag};
use crate::core::types::{AccountId, Region, TagKey};
use crate::error::Result;

pub mod aws;

pub use aws::{AwsConnector, StsIdentity};

/// What the store reports after writing a value.
///
/// Both fields are optional on the wire; the reconciler insists on a
/// version id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Written {
    pub arn: Option<String>,
    pub version_id: Option<String>,
}

/// A new secret to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSecret<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub description: &'a str,
    pub tags: &'a [Tag],
    pub replica_regions: &'a [Region],
}

/// Secret store operations for a single region.
///
/// `secret_id` is either the full name or the ARN.
pub trait SecretStore {
    /// Fetch metadata for `name`.
    ///
    /// # Returns
    ///
    /// `None` if the secret does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Transport` for any other failure.
    fn describe(&self, name: &str) -> Result<Option<RemoteState>>;

    /// Fetch the current textual value.
    ///
    /// # Errors
    ///
    /// Returns `ContractError::BinaryValue` if the value is not textual.
    fn get_value(&self, name: &str) -> Result<String>;

    /// Create a secret with its initial value, tags and replicas.
    fn create(&self, secret: &NewSecret<'_>) -> Result<Written>;

    /// Store a new version of the value.
    fn put_value(&self, name: &str, value: &str) -> Result<Written>;

    /// Cancel a scheduled deletion.
    fn restore(&self, name: &str) -> Result<()>;

    fn add_replica_regions(&self, name: &str, regions: &[Region]) -> Result<()>;

    fn remove_replica_regions(&self, name: &str, regions: &[Region]) -> Result<()>;

    fn untag(&self, secret_id: &str, keys: &[TagKey]) -> Result<()>;

    fn tag(&self, secret_id: &str, tags: &[Tag]) -> Result<()>;
}

/// Builds a store client for a region.
pub trait Connector {
    fn connect(&self, region: &str) -> Result<Box<dyn SecretStore>>;
}

/// Resolves the account the current credentials belong to.
pub trait Identity {
    fn account_id(&self) -> Result<AccountId>;
}

/// Per-region store clients, created on first use and reused afterwards.
///
/// Owned by the session; there is no process-wide client cache.
pub struct Clients<C> {
    connector: C,
    by_region: HashMap<Region, Box<dyn SecretStore>>,
}

impl<C: Connector> Clients<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            by_region: HashMap::new(),
        }
    }

    /// The client for `region`, connecting on first use.
    ///
    /// # Errors
    ///
    /// Returns whatever the connector fails with; nothing is cached then.
    pub fn get(&mut self, region: &str) -> Result<&dyn SecretStore> {
        if !self.by_region.contains_key(region) {
            debug!(region, "connecting store client");
            let client = self.connector.connect(region)?;
            self.by_region.insert(region.to_string(), client);
        }
        Ok(self.by_region[region].as_ref())
    }

    /// Regions with a live client.
    #[cfg(test)]
    fn regions(&self) -> std::collections::BTreeSet<&str> {
        self.by_region.keys().map(String::as_str).collect()
    }
}
