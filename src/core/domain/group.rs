//! Secret group type.
//!
//! A group is a deployment scope: one account, one home region, one name
//! prefix shared by all its secrets.

use serde::Deserialize;

use super::Secret;
use crate::core::types::{AccountId, FullName, Region};

/// A declared collection of secrets sharing account, region and prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretGroup {
    pub account_id: AccountId,
    pub region: Region,
    /// Must start and end with `/`.
    pub name_prefix: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "secret")]
    pub secrets: Vec<Secret>,
}

impl SecretGroup {
    /// Create an empty group.
    pub fn new(
        account_id: impl Into<AccountId>,
        region: impl Into<Region>,
        name_prefix: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
            name_prefix: name_prefix.into(),
            description: String::new(),
            secrets: Vec::new(),
        }
    }

    /// Set the human description shown in the selection list.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a secret declaration.
    pub fn with_secret(mut self, secret: Secret) -> Self {
        self.secrets.push(secret);
        self
    }

    /// Fully-qualified name of `secret` in this group.
    pub fn full_name(&self, secret: &Secret) -> FullName {
        full_name(self, secret)
    }
}

/// Resolve the identity used for every remote call on `secret`.
///
/// Pure concatenation of the group prefix and the secret name.
pub fn full_name(group: &SecretGroup, secret: &Secret) -> FullName {
    format!("{}{}", group.name_prefix, secret.name)
}
