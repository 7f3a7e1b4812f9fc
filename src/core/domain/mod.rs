//! Domain types.

mod group;
mod remote;
mod secret;

pub use group::{full_name, SecretGroup};
pub use remote::{RemoteState, Status, Tag};
pub use secret::{Field, Secret, SecretKind};
