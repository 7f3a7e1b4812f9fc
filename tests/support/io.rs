//! Scripted prompt and capturing reporter.

use std::cell::RefCell;
use std::collections::VecDeque;

use load_secrets::core::prompt::{Answer, Prompt};
use load_secrets::core::report::Reporter;
use load_secrets::error::Result;

/// Replays queued answers. Runs out as `Cancelled` / "no".
#[derive(Debug, Default)]
pub struct Script {
    answers: VecDeque<Answer>,
    confirms: VecDeque<bool>,
    /// Labels of every `read`, in order.
    pub asked: Vec<String>,
    /// Labels of every `confirm`, in order.
    pub confirmed: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a typed answer.
    pub fn answer(mut self, value: &str) -> Self {
        self.answers.push_back(Answer::Value(value.to_string()));
        self
    }

    /// Queue a cancellation.
    pub fn cancel(mut self) -> Self {
        self.answers.push_back(Answer::Cancelled);
        self
    }

    /// Queue a yes/no confirmation.
    pub fn confirm(mut self, yes: bool) -> Self {
        self.confirms.push_back(yes);
        self
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for Script {
    fn read(&mut self, label: &str, _silent: bool) -> Result<Answer> {
        self.asked.push(label.to_string());
        Ok(self.answers.pop_front().unwrap_or(Answer::Cancelled))
    }

    fn confirm(&mut self, label: &str) -> Result<bool> {
        self.confirmed.push(label.to_string());
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}

/// Collects every reported line, prefixed by level.
#[derive(Debug, Default)]
pub struct Capture {
    lines: RefCell<Vec<String>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl Reporter for Capture {
    fn log(&self, msg: &str) {
        self.lines.borrow_mut().push(msg.to_string());
    }

    fn info(&self, msg: &str) {
        self.lines.borrow_mut().push(format!("info {}", msg));
    }

    fn warn(&self, msg: &str) {
        self.lines.borrow_mut().push(format!("warning {}", msg));
    }

    fn error(&self, msg: &str) {
        self.lines.borrow_mut().push(format!("error {}", msg));
    }
}
