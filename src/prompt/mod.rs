//! Interactive collection of a change.
//!
//! [`ask_prompts`] walks the configured components, kinds, body and custom
//! fields in order, asking a [`Prompter`] for each one. The first cancelled or
//! invalid answer ends the whole flow and nothing collected so far is kept.

pub mod mock;

pub use mock::MockPrompter;

use crate::change::{check_body, check_choice, Change};
use crate::config::Config;
use crate::custom::CustomType;
use crate::error::Result;

/// Source of answers for the collector.
///
/// Implementations block until the user answers. Cancelling a prompt is
/// reported as [`crate::ChangieError::Cancelled`].
pub trait Prompter {
    /// Ask the user to pick one of `options`.
    fn select(&mut self, label: &str, options: &[String]) -> Result<String>;

    /// Ask the user for free text.
    fn input(&mut self, label: &str) -> Result<String>;
}

/// Collect a new change by prompting for every configured field.
///
/// Custom field types are resolved before the first prompt, so a config with
/// an unknown type fails without asking anything.
///
/// # Returns
/// * `Ok(Change)` - Fully collected and validated change
/// * `Err(ChangieError::Config)` - A custom field has an unknown type
/// * `Err(ChangieError::Cancelled)` - The user aborted a prompt
/// * `Err(ChangieError::Validation)` - An answer is not allowed
pub fn ask_prompts<P: Prompter + ?Sized>(config: &Config, prompter: &mut P) -> Result<Change> {
    let custom_fields = config
        .custom_choices
        .iter()
        .map(|custom| custom.resolve().map(|field_type| (custom, field_type)))
        .collect::<Result<Vec<_>>>()?;

    let mut change = Change::new(String::new());

    if !config.components.is_empty() {
        let component = prompter.select("Component", &config.components)?;
        check_choice("component", &component, &config.components)?;
        change.component = component;
    }

    if !config.kinds.is_empty() {
        let kind = prompter.select("Kind", &config.kinds)?;
        check_choice("kind", &kind, &config.kinds)?;
        change.kind = kind;
    }

    let body = prompter.input("Body")?;
    check_body(&body)?;
    change.body = body;

    for (custom, field_type) in custom_fields {
        let raw = match &field_type {
            CustomType::Enum { options } => prompter.select(custom.prompt_label(), options)?,
            CustomType::String { .. } | CustomType::Int { .. } => {
                prompter.input(custom.prompt_label())?
            }
        };
        let value = field_type.validate(&custom.key, &raw)?;
        change.custom.insert(custom.key.clone(), value);
    }

    tracing::debug!(
        component = %change.component,
        kind = %change.kind,
        custom = change.custom.len(),
        "collected change"
    );
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::Custom;
    use crate::error::ChangieError;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_only_body() {
        let config = Config {
            kinds: vec![],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().answer("body stuff");

        let change = ask_prompts(&config, &mut prompter).unwrap();
        assert!(change.component.is_empty());
        assert!(change.kind.is_empty());
        assert!(change.custom.is_empty());
        assert_eq!(change.body, "body stuff");
        assert_eq!(prompter.asked(), &["Body".to_string()]);
    }

    #[test]
    fn test_component_kind_and_body() {
        let config = Config {
            components: strings(&["cli", "tests", "utils"]),
            kinds: strings(&["added", "changed", "removed"]),
            ..Default::default()
        };
        let mut prompter = MockPrompter::new()
            .answer("tests")
            .answer("removed")
            .answer("body here");

        let change = ask_prompts(&config, &mut prompter).unwrap();
        assert_eq!(change.component, "tests");
        assert_eq!(change.kind, "removed");
        assert_eq!(change.body, "body here");
        assert!(change.custom.is_empty());
    }

    #[test]
    fn test_body_and_custom() {
        let config = Config {
            kinds: vec![],
            custom_choices: vec![Custom::string("check", "a")],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new()
            .answer("body again")
            .answer("custom check value");

        let change = ask_prompts(&config, &mut prompter).unwrap();
        assert_eq!(change.body, "body again");
        assert_eq!(change.custom["check"], "custom check value");
        assert_eq!(prompter.asked(), &["Body".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_int_and_enum_custom_fields() {
        let config = Config {
            kinds: vec![],
            custom_choices: vec![
                Custom::int("issue", "Issue"),
                Custom::enumeration("team", "Team", strings(&["core", "docs"])),
            ],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new()
            .answer("body")
            .answer("42")
            .answer("docs");

        let change = ask_prompts(&config, &mut prompter).unwrap();
        assert_eq!(change.custom["issue"], "42");
        assert_eq!(change.custom["team"], "docs");
    }

    #[test]
    fn test_invalid_custom_type_fails_before_prompting() {
        let config = Config {
            kinds: vec![],
            custom_choices: vec![Custom {
                key: "check".to_string(),
                field_type: "bad type".to_string(),
                label: "a".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().answer("body again");

        let err = ask_prompts(&config, &mut prompter).unwrap_err();
        assert!(matches!(err, ChangieError::Config(_)));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_cancel_component() {
        let config = Config {
            components: strings(&["a", "b"]),
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().cancel();
        assert!(ask_prompts(&config, &mut prompter)
            .unwrap_err()
            .is_cancelled());
    }

    #[test]
    fn test_cancel_kind() {
        let config = Config {
            kinds: strings(&["a", "b"]),
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().cancel();
        assert!(ask_prompts(&config, &mut prompter)
            .unwrap_err()
            .is_cancelled());
    }

    #[test]
    fn test_cancel_body() {
        let config = Config {
            kinds: vec![],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().cancel();
        assert!(ask_prompts(&config, &mut prompter)
            .unwrap_err()
            .is_cancelled());
    }

    #[test]
    fn test_cancel_custom_value() {
        let config = Config {
            kinds: vec![],
            custom_choices: vec![Custom::string("check", "a")],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().answer("body again").cancel();
        assert!(ask_prompts(&config, &mut prompter)
            .unwrap_err()
            .is_cancelled());
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let config = Config {
            kinds: vec![],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().answer("   ");
        let err = ask_prompts(&config, &mut prompter).unwrap_err();
        assert!(matches!(err, ChangieError::Validation(_)));
    }

    #[test]
    fn test_unknown_selection_stops_the_flow() {
        let config = Config {
            kinds: strings(&["added", "removed"]),
            ..Default::default()
        };
        let mut prompter = MockPrompter::new().answer("Added").answer("body");

        let err = ask_prompts(&config, &mut prompter).unwrap_err();
        assert!(matches!(err, ChangieError::Validation(_)));
        assert_eq!(prompter.asked(), &["Kind".to_string()]);
    }

    #[test]
    fn test_bad_int_stops_the_flow() {
        let config = Config {
            kinds: vec![],
            custom_choices: vec![Custom::int("issue", "Issue"), Custom::string("who", "Who")],
            ..Default::default()
        };
        let mut prompter = MockPrompter::new()
            .answer("body")
            .answer("not a number")
            .answer("me");

        assert!(ask_prompts(&config, &mut prompter).is_err());
        assert_eq!(prompter.remaining(), 1);
    }
}
