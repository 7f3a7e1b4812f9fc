//! Operator input collaborator.
//!
//! Cancellation is an ordinary answer, not an error: it unwinds only the
//! current reconciliation attempt.

use crate::error::Result;

/// What the operator answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Entered text, exactly as typed. May be empty.
    Value(String),
    /// The operator aborted the prompt (Ctrl+C or end of input).
    Cancelled,
}

/// Reads operator input.
pub trait Prompt {
    /// Read one line.
    ///
    /// With `silent` the input is not echoed.
    ///
    /// # Errors
    ///
    /// Returns an error only for terminal failures, never for cancellation.
    fn read(&mut self, label: &str, silent: bool) -> Result<Answer>;

    /// Ask a yes/no question. Cancellation counts as "no".
    fn confirm(&mut self, label: &str) -> Result<bool>;
}
