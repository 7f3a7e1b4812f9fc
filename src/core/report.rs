//! Reporting collaborator.
//!
//! Purely presentational; nothing in the core depends on how messages are
//! rendered.

/// How an inline fragment should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Names, ARNs, versions, field keys.
    Identifier,
    /// Secret values echoed back to the operator.
    Value,
    /// Examples shown next to a field.
    Example,
    /// Things being added.
    Added,
    /// Things being removed.
    Removed,
}

/// Operator-facing output sink.
pub trait Reporter {
    /// Plain line.
    fn log(&self, msg: &str);

    fn info(&self, msg: &str);

    fn warn(&self, msg: &str);

    fn error(&self, msg: &str);

    /// Style an inline fragment. Plain text by default.
    fn emphasize(&self, text: &str, _emphasis: Emphasis) -> String {
        text.to_string()
    }
}

/// Indent every line of `text` by two spaces, for echoing values.
pub fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
