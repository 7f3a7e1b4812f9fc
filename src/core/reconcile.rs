//! Reconciliation of a single declared secret.
//!
//! One attempt runs:
//!
//! ```text
//! FetchRemote ─┬─ absent ──> collect ──> Create ─────────────────────────────┬─> Report
//!              └─ present ─> collect ──> [Restore] ─> PutValue ─> Replicas ─> Tags ─┘
//!                               │
//!                               └─ cancelled ──> Aborted
//! ```
//!
//! Collection always happens before the first mutating call, so an aborted
//! attempt leaves the store untouched.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::collect::Collector;
use crate::core::constants::CREATED_DESCRIPTION;
use crate::core::diff::{desired_tags, ReplicaDiff, TagDiff};
use crate::core::domain::{RemoteState, Secret, SecretGroup, Tag};
use crate::core::prompt::{Answer, Prompt};
use crate::core::report::{indent, Emphasis, Reporter};
use crate::core::store::{NewSecret, SecretStore, Written};
use crate::core::types::{FullName, Region};
use crate::error::{ContractError, Result};

/// What a completed write changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub full_name: FullName,
    pub arn: String,
    pub version_id: String,
    pub replicas_added: Vec<Region>,
    pub replicas_removed: Vec<Region>,
    /// Undeclared replicas the operator chose to keep.
    pub replicas_retained: Vec<Region>,
    pub tags: TagDiff,
}

/// Terminal state of one reconciliation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(Summary),
    Updated(Summary),
    /// The operator cancelled value collection; nothing was written.
    Aborted(FullName),
    /// The store broke its contract; reported and skipped.
    Failed {
        full_name: FullName,
        error: ContractError,
    },
}

/// Reconciles one secret against one regional store.
pub struct Reconciler<'a> {
    store: &'a dyn SecretStore,
    prompt: &'a mut dyn Prompt,
    reporter: &'a dyn Reporter,
    silent: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        store: &'a dyn SecretStore,
        prompt: &'a mut dyn Prompt,
        reporter: &'a dyn Reporter,
        silent: bool,
    ) -> Self {
        Self {
            store,
            prompt,
            reporter,
            silent,
        }
    }

    /// Bring the remote secret in line with its declaration.
    ///
    /// # Errors
    ///
    /// `ContractError` if the store answers without a version id or holds a
    /// binary value; any transport error from the store.
    pub fn reconcile(&mut self, group: &SecretGroup, secret: &Secret) -> Result<Outcome> {
        let full_name = group.full_name(secret);
        debug!(name = %full_name, region = %group.region, "reconciling secret");

        let remote = self.store.describe(&full_name)?;
        self.show_current(&full_name, remote.as_ref())?;

        let value = {
            let mut collector = Collector::new(&mut *self.prompt, self.reporter, self.silent);
            match collector.collect(secret)? {
                Answer::Value(value) => Zeroizing::new(value),
                Answer::Cancelled => {
                    self.reporter.log("Aborted");
                    info!(name = %full_name, "reconciliation aborted");
                    return Ok(Outcome::Aborted(full_name));
                }
            }
        };

        self.reporter.log("Storing secret value:");
        if !self.silent {
            self.reporter
                .log(&self.reporter.emphasize(&indent(&value), Emphasis::Value));
        }

        let outcome = match remote {
            None => Outcome::Created(self.create(&full_name, secret, &value)?),
            Some(state) => Outcome::Updated(self.update(&full_name, secret, &state, &value)?),
        };

        if let Outcome::Created(summary) | Outcome::Updated(summary) = &outcome {
            self.report(summary);
        }
        Ok(outcome)
    }

    fn show_current(&self, full_name: &str, remote: Option<&RemoteState>) -> Result<()> {
        self.reporter.log(&format!(
            "Secret: {}",
            self.reporter.emphasize(full_name, Emphasis::Identifier)
        ));

        match remote {
            None => self
                .reporter
                .log("The secret does not already exist and will be created"),
            Some(state) if state.is_pending_deletion() => self
                .reporter
                .log("The secret is scheduled for deletion and will be restored"),
            Some(_) => {
                let current = Zeroizing::new(self.store.get_value(full_name)?);
                self.reporter.log("Current value:");
                self.reporter
                    .log(&self.reporter.emphasize(&indent(&current), Emphasis::Value));
            }
        }

        self.reporter.log("");
        Ok(())
    }

    fn create(&self, full_name: &str, secret: &Secret, value: &str) -> Result<Summary> {
        let desired = desired_tags(secret);
        let tags: Vec<Tag> = desired
            .iter()
            .map(|(k, v)| Tag::new(k.clone(), v.clone()))
            .collect();
        let replicas = ReplicaDiff::compute(&secret.replica_regions, &BTreeSet::new()).added;

        let written = self.store.create(&NewSecret {
            name: full_name,
            value,
            description: CREATED_DESCRIPTION,
            tags: &tags,
            replica_regions: &replicas,
        })?;
        let (arn, version_id) = require_version(full_name, written)?;
        info!(name = full_name, version = %version_id, "secret created");

        Ok(Summary {
            full_name: full_name.to_string(),
            arn,
            version_id,
            replicas_added: replicas,
            replicas_removed: Vec::new(),
            replicas_retained: Vec::new(),
            tags: TagDiff::compute(&desired, &BTreeMap::new()),
        })
    }

    fn update(
        &mut self,
        full_name: &str,
        secret: &Secret,
        state: &RemoteState,
        value: &str,
    ) -> Result<Summary> {
        if state.is_pending_deletion() {
            self.reporter.log("Restoring secret scheduled for deletion");
            self.store.restore(full_name)?;
        }

        let written = self.store.put_value(full_name, value)?;
        let (arn, version_id) = require_version(full_name, written)?;
        info!(name = full_name, version = %version_id, "secret value stored");

        let replicas = ReplicaDiff::compute(&secret.replica_regions, &state.replica_regions);
        if !replicas.added.is_empty() {
            self.store.add_replica_regions(full_name, &replicas.added)?;
        }
        let mut retained = Vec::new();
        let mut removed = Vec::new();
        if !replicas.removed.is_empty() {
            if self.confirm_replica_removal(&replicas.removed)? {
                self.store
                    .remove_replica_regions(full_name, &replicas.removed)?;
                removed = replicas.removed;
            } else {
                retained = replicas.removed;
            }
        }

        let tags = TagDiff::compute(&desired_tags(secret), &state.tags);
        self.sync_tags(&state.arn, &tags)?;

        Ok(Summary {
            full_name: full_name.to_string(),
            arn,
            version_id,
            replicas_added: replicas.added,
            replicas_removed: removed,
            replicas_retained: retained,
            tags,
        })
    }

    fn confirm_replica_removal(&mut self, regions: &[Region]) -> Result<bool> {
        self.reporter.warn(&format!(
            "Read replicas exist in undeclared regions: {}",
            regions.join(", ")
        ));
        self.prompt
            .confirm("Remove these read replicas? This deletes the replica secrets")
    }

    fn sync_tags(&self, arn: &str, diff: &TagDiff) -> Result<()> {
        if !diff.remove.is_empty() {
            self.reporter.log(&format!(
                "Removing obsolete tags: {}",
                diff.remove.join(", ")
            ));
            self.store.untag(arn, &diff.remove)?;
        }

        if !diff.upsert.is_empty() {
            let keys: Vec<&str> = diff.upsert.iter().map(|t| t.key.as_str()).collect();
            self.reporter
                .log(&format!("Storing tags: {}", keys.join(", ")));
            self.store.tag(arn, &diff.upsert)?;
        }

        Ok(())
    }

    fn report(&self, summary: &Summary) {
        let r = self.reporter;
        r.log("");
        r.log("Secret stored:");
        r.log(&format!(
            "ARN: {}",
            r.emphasize(&summary.arn, Emphasis::Identifier)
        ));
        r.log(&format!(
            "Version: {}",
            r.emphasize(&summary.version_id, Emphasis::Identifier)
        ));
        if !summary.replicas_added.is_empty() {
            r.log(&format!(
                "Read replicas added to regions: {}",
                emphasize_all(r, &summary.replicas_added, Emphasis::Added)
            ));
        }
        if !summary.replicas_removed.is_empty() {
            r.log(&format!(
                "Read replicas removed from regions: {}",
                emphasize_all(r, &summary.replicas_removed, Emphasis::Removed)
            ));
        }
        if !summary.replicas_retained.is_empty() {
            r.warn(&format!(
                "Read replicas kept in undeclared regions: {}",
                summary.replicas_retained.join(", ")
            ));
        }
    }
}

fn require_version(full_name: &str, written: Written) -> Result<(String, String)> {
    let version_id = written
        .version_id
        .ok_or_else(|| ContractError::MissingVersionId(full_name.to_string()))?;
    let arn = written.arn.unwrap_or_else(|| full_name.to_string());
    Ok((arn, version_id))
}

fn emphasize_all(reporter: &dyn Reporter, items: &[String], emphasis: Emphasis) -> String {
    items
        .iter()
        .map(|item| reporter.emphasize(item, emphasis))
        .collect::<Vec<_>>()
        .join(", ")
}
