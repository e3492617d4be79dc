//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The terminal-backed [`Prompter`]

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use console::style;

use crate::error::{ChangieError, Result};
use crate::prompt::Prompter;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{display_changes, display_error, display_status, display_success};

/// End-of-text, sent by Ctrl-C when the terminal passes it through.
const INTERRUPT: char = '\u{3}';

/// Line-based prompter over any input and output stream.
///
/// Prompts are written to `output` and answers read one line at a time from
/// `input`. End of input or a Ctrl-C character cancels the prompt.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stderr> {
    /// Prompter reading stdin and writing prompts to stderr.
    pub fn stdio() -> Self {
        TerminalPrompter::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalPrompter { input, output }
    }

    /// Read one answer, without its line terminator.
    fn read_answer(&mut self, label: &str) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ChangieError::cancelled(label));
        }
        if line.contains(INTERRUPT) {
            return Err(ChangieError::cancelled(label));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    /// Displays a numbered list and accepts a 1-based index or the exact
    /// option text. Pressing Enter picks the first option.
    fn select(&mut self, label: &str, options: &[String]) -> Result<String> {
        writeln!(self.output, "\n{}", style(label).bold())?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, option)?;
        }
        write!(
            self.output,
            "Select {} (1-{}) [default: 1]: ",
            label.to_lowercase(),
            options.len()
        )?;
        self.output.flush()?;

        let answer = self.read_answer(label)?;
        let selection = answer.trim();

        if selection.is_empty() {
            return options
                .first()
                .cloned()
                .ok_or_else(|| ChangieError::validation(format!("no {} options", label)));
        }

        if let Some(option) = options.iter().find(|o| o.as_str() == selection) {
            return Ok(option.clone());
        }

        match selection.parse::<usize>() {
            Ok(index) if index > 0 && index <= options.len() => Ok(options[index - 1].clone()),
            _ => Err(ChangieError::validation(format!(
                "invalid {} selection '{}'",
                label, selection
            ))),
        }
    }

    fn input(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", style(label).bold())?;
        self.output.flush()?;
        self.read_answer(label)
    }
}
