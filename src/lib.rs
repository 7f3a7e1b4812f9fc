//! load-secrets - interactively load declared secrets into AWS Secrets Manager.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── load          # Interactive session against AWS
//! │   ├── check         # Offline config validation
//! │   ├── prompt        # dialoguer-backed input
//! │   └── output        # Terminal reporter
//! └── core/             # Core library components
//!     ├── config        # secrets.toml loading
//!     ├── domain/       # Groups, secrets, fields, remote state
//!     ├── validation    # Group invariants
//!     ├── diff/         # Tag and replica diff engines
//!     ├── collect       # Value collection (string / JSON)
//!     ├── reconcile     # Create-or-update state machine
//!     ├── session       # Selection loop
//!     └── store/        # Store trait, client registry, AWS backend
//! ```
//!
//! # Features
//!
//! - Creates missing secrets, writes new versions of existing ones
//! - Restores secrets scheduled for deletion before writing
//! - Converges tags and cross-region read replicas
//! - Cancelling input never touches the store

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::Config;
pub use crate::core::diff::{ReplicaDiff, TagDiff};
pub use crate::core::domain::{full_name, Field, RemoteState, Secret, SecretGroup, SecretKind, Tag};
pub use crate::core::reconcile::{Outcome, Reconciler, Summary};
pub use crate::core::session::Session;
