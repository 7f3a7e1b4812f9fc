use std::collections::BTreeSet;

use crate::core::types::Region;

/// Replica region operations needed to converge current onto desired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicaDiff {
    /// Desired regions without a replica, in declaration order.
    pub added: Vec<Region>,
    /// Replicated regions that are no longer declared, sorted.
    pub removed: Vec<Region>,
}

impl ReplicaDiff {
    /// Compute the diff. Duplicate declarations collapse to one region.
    pub fn compute(desired: &[Region], current: &BTreeSet<Region>) -> Self {
        let mut seen = BTreeSet::new();
        let added = desired
            .iter()
            .filter(|region| !current.contains(*region) && seen.insert(*region))
            .cloned()
            .collect();

        let removed = current
            .iter()
            .filter(|region| !desired.contains(*region))
            .cloned()
            .collect();

        Self { added, removed }
    }

    /// Whether no replica operation is needed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// The replica set after applying this diff to `current`.
    pub fn apply(&self, current: &BTreeSet<Region>) -> BTreeSet<Region> {
        let mut regions = current.clone();
        for region in &self.removed {
            regions.remove(region);
        }
        regions.extend(self.added.iter().cloned());
        regions
    }
}
