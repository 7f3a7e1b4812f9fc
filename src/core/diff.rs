//! Diff engines.
//!
//! Compare declared desired state against a `RemoteState` and compute the
//! minimal set of operations that converges them. Both engines are pure and
//! idempotent: diffing against the state after applying a diff yields an
//! empty diff.

mod replicas;
mod tags;

pub use replicas::ReplicaDiff;
pub use tags::{desired_tags, TagDiff};
