use std::collections::VecDeque;

use crate::error::{ChangieError, Result};
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq)]
enum Answer {
    Value(String),
    Cancel,
}

/// Scripted prompter for testing without a terminal.
///
/// Answers are replayed in order for both `select` and `input`. Running out of
/// answers behaves like the user closing the input stream.
#[derive(Debug, Default)]
pub struct MockPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl MockPrompter {
    /// Create a prompter with no scripted answers
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next prompt
    pub fn answer(mut self, value: impl Into<String>) -> Self {
        self.answers.push_back(Answer::Value(value.into()));
        self
    }

    /// Queue a cancellation for the next prompt
    pub fn cancel(mut self) -> Self {
        self.answers.push_back(Answer::Cancel);
        self
    }

    /// Labels of every prompt that was shown, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Number of scripted answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, label: &str) -> Result<String> {
        self.asked.push(label.to_string());
        match self.answers.pop_front() {
            Some(Answer::Value(value)) => Ok(value),
            Some(Answer::Cancel) | None => Err(ChangieError::cancelled(label)),
        }
    }
}

impl Prompter for MockPrompter {
    fn select(&mut self, label: &str, _options: &[String]) -> Result<String> {
        self.next(label)
    }

    fn input(&mut self, label: &str) -> Result<String> {
        self.next(label)
    }
}
