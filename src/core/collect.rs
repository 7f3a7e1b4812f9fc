//! Interactive value collection.
//!
//! Gathers a new secret value from the operator. Purely local: nothing here
//! touches the store.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::VALUE_PROMPT;
use crate::core::domain::{Field, Secret, SecretKind};
use crate::core::prompt::{Answer, Prompt};
use crate::core::report::{Emphasis, Reporter};
use crate::error::Result;

/// Drives collection of one secret value.
pub struct Collector<'a> {
    prompt: &'a mut dyn Prompt,
    reporter: &'a dyn Reporter,
    silent: bool,
}

impl<'a> Collector<'a> {
    pub fn new(prompt: &'a mut dyn Prompt, reporter: &'a dyn Reporter, silent: bool) -> Self {
        Self {
            prompt,
            reporter,
            silent,
        }
    }

    /// Collect a value shaped by `secret.kind`.
    ///
    /// # Returns
    ///
    /// `Answer::Value` with the text to store, or `Answer::Cancelled` if the
    /// operator aborted at any point. A cancelled JSON collection returns
    /// nothing of what was entered before.
    pub fn collect(&mut self, secret: &Secret) -> Result<Answer> {
        match &secret.kind {
            SecretKind::String => self.prompt.read(VALUE_PROMPT, self.silent),
            SecretKind::Json { fields } => self.collect_json(fields),
        }
    }

    fn collect_json(&mut self, fields: &[Field]) -> Result<Answer> {
        self.reporter
            .log("The secret is of type JSON with these expected fields:");
        for field in fields {
            match field.description() {
                Some(desc) => self.reporter.log(&format!("  - {} ({})", field.key(), desc)),
                None => self.reporter.log(&format!("  - {}", field.key())),
            }
        }
        self.reporter.log("");

        let mut entries: Vec<(&str, Zeroizing<String>)> = Vec::with_capacity(fields.len());
        for field in fields {
            self.reporter.log(&format!(
                "Field: {}",
                self.reporter.emphasize(field.key(), Emphasis::Identifier)
            ));
            if let Some(example) = field.example() {
                self.reporter.log(&format!(
                    "Example: {}",
                    self.reporter.emphasize(example, Emphasis::Example)
                ));
            }

            match self.prompt.read(VALUE_PROMPT, self.silent)? {
                Answer::Value(value) => entries.push((field.key(), Zeroizing::new(value))),
                Answer::Cancelled => {
                    debug!(field = field.key(), "json collection cancelled");
                    return Ok(Answer::Cancelled);
                }
            }
            self.reporter.log("");
        }

        let rendered = render_json(entries.iter().map(|(key, value)| (*key, value.as_str())))?;
        Ok(Answer::Value(rendered))
    }
}

/// Field values borrowed straight into the serializer, never copied.
struct Entries<'a>(Vec<(&'a str, &'a str)>);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Render collected fields as a pretty-printed JSON object, two-space
/// indented, keys in the order given.
///
/// A repeated key keeps its first position and its last value.
pub fn render_json<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut fields: Vec<(&str, &str)> = Vec::new();
    for (key, value) in entries {
        match fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => fields.push((key, value)),
        }
    }

    Ok(serde_json::to_string_pretty(&Entries(fields))?)
}
