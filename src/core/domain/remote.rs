//! Remote state snapshot.
//!
//! Fetched fresh for every reconciliation attempt and every listing; never
//! cached across secrets.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::core::types::{Region, TagKey, TagValue};

/// A single tag. The key is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub key: TagKey,
    pub value: TagValue,
}

impl Tag {
    pub fn new(key: impl Into<TagKey>, value: impl Into<TagValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// What the store currently holds for one fully-qualified name.
///
/// Absence is expressed as `Option<RemoteState>` rather than a flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteState {
    pub arn: String,
    pub tags: BTreeMap<TagKey, TagValue>,
    /// Regions from the replication status, unknown entries dropped.
    pub replica_regions: BTreeSet<Region>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub last_changed_at: Option<DateTime<Utc>>,
}

impl RemoteState {
    pub fn new(arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            ..Self::default()
        }
    }

    /// Whether the secret is scheduled for deletion and needs a restore.
    pub fn is_pending_deletion(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Operator-facing status line for a secret in the selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Absent,
    PendingDeletion(DateTime<Utc>),
    LastChanged(Option<DateTime<Utc>>),
}

impl Status {
    pub fn of(state: Option<&RemoteState>) -> Self {
        match state {
            None => Status::Absent,
            Some(RemoteState {
                deleted_at: Some(at),
                ..
            }) => Status::PendingDeletion(*at),
            Some(state) => Status::LastChanged(state.last_changed_at),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Absent => write!(f, "not yet created"),
            Status::PendingDeletion(at) => write!(
                f,
                "scheduled for deletion {}",
                at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            Status::LastChanged(Some(at)) => write!(
                f,
                "last changed {}",
                at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            Status::LastChanged(None) => write!(f, "last changed unknown"),
        }
    }
}
