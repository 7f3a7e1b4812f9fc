//! Secret declaration types.
//!
//! A secret is declared once in the config and never changes during a
//! session. Its kind decides how the value is collected.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::types::{Region, TagKey, TagValue};

/// A declared secret within a group.
///
/// Deserialized through `SecretDecl`, which rejects unknown keys so a
/// misspelled `replica_regions` cannot read as "no replicas".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SecretDecl")]
pub struct Secret {
    /// Name relative to the group's prefix.
    pub name: String,
    /// How the value is shaped and collected.
    pub kind: SecretKind,
    /// Regions that should hold a read replica. May be empty.
    pub replica_regions: Vec<Region>,
    /// Extra tags to keep on the secret besides the provenance tag.
    pub tags: BTreeMap<TagKey, TagValue>,
}

/// `type` as written in the config.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindName {
    String,
    Json,
}

/// A secret table exactly as written in the config.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SecretDecl {
    name: String,
    #[serde(rename = "type")]
    kind: KindName,
    fields: Option<Vec<Field>>,
    #[serde(default)]
    replica_regions: Vec<Region>,
    #[serde(default)]
    tags: BTreeMap<TagKey, TagValue>,
}

impl TryFrom<SecretDecl> for Secret {
    type Error = String;

    fn try_from(decl: SecretDecl) -> Result<Self, Self::Error> {
        let kind = match (decl.kind, decl.fields) {
            (KindName::String, None) => SecretKind::String,
            (KindName::String, Some(_)) => {
                return Err(format!("secret {}: fields only apply to json secrets", decl.name))
            }
            (KindName::Json, Some(fields)) => SecretKind::Json { fields },
            (KindName::Json, None) => {
                return Err(format!("secret {}: json secret needs fields", decl.name))
            }
        };

        Ok(Self {
            name: decl.name,
            kind,
            replica_regions: decl.replica_regions,
            tags: decl.tags,
        })
    }
}

impl Secret {
    /// Create a flat string secret with no replicas or extra tags.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SecretKind::String,
            replica_regions: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    /// Create a structured secret with the given fields.
    pub fn json(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            kind: SecretKind::Json { fields },
            replica_regions: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    /// Replace the declared replica regions.
    pub fn with_replicas<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Region>,
    {
        self.replica_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Add a declared tag.
    pub fn with_tag(mut self, key: impl Into<TagKey>, value: impl Into<TagValue>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Shape of a secret value.
///
/// Unknown `type` values fail deserialization, so an unsupported kind never
/// reaches the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretKind {
    /// A single line stored as-is.
    String,
    /// A JSON object built from the declared fields, in order.
    Json { fields: Vec<Field> },
}

/// A named slot in a JSON secret.
///
/// Declared either as a bare key (`"username"`) or as a table with an
/// optional description and example.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum Field {
    Key(String),
    Described {
        key: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        example: Option<String>,
    },
}

impl Field {
    /// The JSON key this field is stored under.
    pub fn key(&self) -> &str {
        match self {
            Field::Key(key) | Field::Described { key, .. } => key,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Field::Key(_) => None,
            Field::Described { description, .. } => description.as_deref(),
        }
    }

    pub fn example(&self) -> Option<&str> {
        match self {
            Field::Key(_) => None,
            Field::Described { example, .. } => example.as_deref(),
        }
    }
}

impl From<&str> for Field {
    fn from(key: &str) -> Self {
        Field::Key(key.to_string())
    }
}
