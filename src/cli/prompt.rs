//! Terminal prompt.
//!
//! Interactive input goes through dialoguer; piped input is read line by
//! line so sessions can be scripted. Ctrl+C while typing and end of input
//! both count as cancellation.

use std::io::{self, BufRead, ErrorKind, IsTerminal};

use dialoguer::{Confirm, Input, Password};
use tracing::trace;

use crate::core::prompt::{Answer, Prompt};
use crate::error::Result;

/// Prompt backed by the process's stdin.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }

    fn read_piped(&self) -> Result<Answer> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            trace!("stdin closed");
            return Ok(Answer::Cancelled);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Answer::Value(trimmed.to_string()))
    }
}

/// Map a dialoguer result, turning an interrupted read into cancellation.
fn interrupted_as_cancel(result: dialoguer::Result<String>) -> Result<Answer> {
    match result {
        Ok(value) => Ok(Answer::Value(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == ErrorKind::Interrupted => {
            Ok(Answer::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

impl Prompt for Terminal {
    fn read(&mut self, label: &str, silent: bool) -> Result<Answer> {
        if !io::stdin().is_terminal() {
            print!("{}: ", label);
            io::Write::flush(&mut io::stdout())?;
            let answer = self.read_piped();
            println!();
            return answer;
        }

        if silent {
            interrupted_as_cancel(
                Password::new()
                    .with_prompt(label)
                    .allow_empty_password(true)
                    .interact(),
            )
        } else {
            interrupted_as_cancel(
                Input::<String>::new()
                    .with_prompt(label)
                    .allow_empty(true)
                    .interact_text(),
            )
        }
    }

    fn confirm(&mut self, label: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            print!("{} [y/N]: ", label);
            io::Write::flush(&mut io::stdout())?;
            return Ok(match self.read_piped()? {
                Answer::Value(v) => matches!(v.trim(), "y" | "Y" | "yes"),
                Answer::Cancelled => false,
            });
        }

        match Confirm::new().with_prompt(label).default(false).interact() {
            Ok(answer) => Ok(answer),
            Err(dialoguer::Error::IO(e)) if e.kind() == ErrorKind::Interrupted => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
