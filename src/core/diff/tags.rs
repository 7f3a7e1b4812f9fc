use std::collections::BTreeMap;

use crate::core::constants::{PROVENANCE_TAG_KEY, PROVENANCE_TAG_VALUE};
use crate::core::domain::{Secret, Tag};
use crate::core::types::{TagKey, TagValue};

/// Tags a managed secret should carry: its declared tags plus the
/// provenance tag, which always wins.
pub fn desired_tags(secret: &Secret) -> BTreeMap<TagKey, TagValue> {
    let mut tags = secret.tags.clone();
    tags.insert(
        PROVENANCE_TAG_KEY.to_string(),
        PROVENANCE_TAG_VALUE.to_string(),
    );
    tags
}

/// Tag operations needed to converge existing tags onto desired tags.
///
/// Removals are applied before upserts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Existing keys that are not desired.
    pub remove: Vec<TagKey>,
    /// Desired tags that are missing or carry a different value.
    pub upsert: Vec<Tag>,
}

impl TagDiff {
    /// Compute the diff. Values compare by exact, case-sensitive equality.
    ///
    /// Pass an empty map for `existing` when the secret does not exist yet.
    pub fn compute(
        desired: &BTreeMap<TagKey, TagValue>,
        existing: &BTreeMap<TagKey, TagValue>,
    ) -> Self {
        let remove = existing
            .keys()
            .filter(|key| !desired.contains_key(*key))
            .cloned()
            .collect();

        let upsert = desired
            .iter()
            .filter(|(key, value)| existing.get(*key) != Some(*value))
            .map(|(key, value)| Tag::new(key.clone(), value.clone()))
            .collect();

        Self { remove, upsert }
    }

    /// Whether no tag operation is needed.
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.upsert.is_empty()
    }

    /// The tag set after applying this diff to `existing`.
    pub fn apply(&self, existing: &BTreeMap<TagKey, TagValue>) -> BTreeMap<TagKey, TagValue> {
        let mut tags = existing.clone();
        for key in &self.remove {
            tags.remove(key);
        }
        for tag in &self.upsert {
            tags.insert(tag.key.clone(), tag.value.clone());
        }
        tags
    }
}
