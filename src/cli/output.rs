//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: identifiers, added regions
//! - Red: errors, removed regions
//! - Yellow: warnings, secret values
//! - Magenta: examples
//! - Blue: info
//! - Bold: headers

use console::{style, Style};

use crate::core::report::{Emphasis, Reporter};

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

fn paint(text: &str, style: Style) -> String {
    if colors_enabled() {
        style.apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ config file not found: secrets.toml`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", Style::new().red()), msg);
}

/// Print a warning message to stderr (yellow).
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint("⚠", Style::new().yellow()), msg);
}

/// Print an info message (blue marker).
pub fn info(msg: &str) {
    println!("{} {}", paint("info", Style::new().blue()), msg);
}

/// Print a success message with checkmark (green).
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", Style::new().green()), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ set LOAD_SECRETS_CONFIG or pass --config`
pub fn hint(msg: &str) {
    println!("{} {}", paint("→", Style::new().cyan()), paint(msg, Style::new().cyan()));
}

/// Print a bold section header.
pub fn header(title: &str) {
    println!("{}", paint(title, Style::new().bold()));
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  region:  eu-west-1`
pub fn kv(label: &str, value: &str) {
    println!(
        "  {}  {}",
        paint(label, Style::new().dim()),
        paint(value, Style::new().bold())
    );
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", paint(&"─".repeat(RULE_WIDTH), Style::new().dim()));
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// Format a secret name in green.
pub fn name(n: &str) -> String {
    paint(n, Style::new().green())
}

/// Terminal implementation of the reporting collaborator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Reporter for Console {
    fn log(&self, msg: &str) {
        println!("{}", msg);
    }

    fn info(&self, msg: &str) {
        info(msg);
    }

    fn warn(&self, msg: &str) {
        warn(msg);
    }

    fn error(&self, msg: &str) {
        error(msg);
    }

    fn emphasize(&self, text: &str, emphasis: Emphasis) -> String {
        let styled = match emphasis {
            Emphasis::Identifier | Emphasis::Added => style(text).green().bright(),
            Emphasis::Value => style(text).yellow().bright(),
            Emphasis::Example => style(text).magenta().bright(),
            Emphasis::Removed => style(text).red().bright(),
        };
        if colors_enabled() {
            styled.to_string()
        } else {
            text.to_string()
        }
    }
}
