//! Test support utilities for load-secrets integration tests.
//!
//! Provides an in-memory store, scripted operator input and a capturing
//! reporter so the reconciler and session run without AWS or a terminal.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod io;
pub mod store;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use io::*;
#[allow(unused_imports)]
pub use store::*;
