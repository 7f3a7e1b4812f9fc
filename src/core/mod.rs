//! Core library components.
//!
//! Declared secret groups, the diff engines that compare them with what the
//! store holds, and the interactive workflow that applies the result.

pub mod collect;
pub mod config;
pub mod constants;
pub mod diff;
pub mod domain;
pub mod prompt;
pub mod reconcile;
pub mod report;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;
