//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::change::Change;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One line per change: `component / kind: body`, with unset parts left out.
///
/// Multi-line bodies are folded onto the first line's indentation.
pub fn format_change_line(change: &Change) -> String {
    let prefix = [change.component.as_str(), change.kind.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" / ");

    let body = change.body.trim().replace('\n', "\n    ");
    if prefix.is_empty() {
        format!("  - {}", body)
    } else {
        format!("  - {}: {}", prefix, body)
    }
}

/// Display unreleased changes in the order given.
pub fn display_changes(changes: &[Change]) {
    if changes.is_empty() {
        display_status("No unreleased changes");
        return;
    }

    println!("{}", style(format!("Unreleased changes ({}):", changes.len())).bold());
    for change in changes {
        println!("{}", format_change_line(change));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_change_line() {
        let mut change = Change::new("fixed the thing");
        assert_eq!(format_change_line(&change), "  - fixed the thing");

        change.kind = "Fixed".to_string();
        assert_eq!(format_change_line(&change), "  - Fixed: fixed the thing");

        change.component = "cli".to_string();
        assert_eq!(format_change_line(&change), "  - cli / Fixed: fixed the thing");
    }

    #[test]
    fn test_format_multiline_body() {
        let change = Change::new("first\nsecond\n");
        assert_eq!(format_change_line(&change), "  - first\n    second");
    }

    #[test]
    fn test_display_functions() {
        // Visual verification test - output is printed to stdout/stderr
        display_error("test error");
        display_success("test success");
        display_changes(&[]);
    }
}
