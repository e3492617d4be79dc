use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::custom::Custom;
use crate::error::{ChangieError, Result};

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "changie.toml";

/// Represents the complete configuration for changie.
///
/// Contains the change directories, the ordered kind and component lists and
/// the custom fields collected for every change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_changes_dir")]
    pub changes_dir: String,

    #[serde(default = "default_unreleased_dir")]
    pub unreleased_dir: String,

    #[serde(default)]
    pub kinds: Vec<String>,

    #[serde(default)]
    pub components: Vec<String>,

    #[serde(default)]
    pub custom_choices: Vec<Custom>,
}

/// Returns the default root directory for change files.
fn default_changes_dir() -> String {
    ".changes".to_string()
}

/// Returns the default subdirectory for unreleased changes.
fn default_unreleased_dir() -> String {
    "unreleased".to_string()
}

/// Returns the default list of change kinds, in changelog order.
fn default_kinds() -> Vec<String> {
    vec![
        "Added".to_string(),
        "Changed".to_string(),
        "Deprecated".to_string(),
        "Removed".to_string(),
        "Fixed".to_string(),
        "Security".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            changes_dir: default_changes_dir(),
            unreleased_dir: default_unreleased_dir(),
            kinds: default_kinds(),
            components: Vec::new(),
            custom_choices: Vec::new(),
        }
    }
}

impl Config {
    /// Directory holding unreleased change files.
    pub fn unreleased_path(&self) -> PathBuf {
        Path::new(&self.changes_dir).join(&self.unreleased_dir)
    }

    /// Checks the custom field definitions.
    ///
    /// Every key must be usable in a file name and unique, and every type must
    /// resolve.
    pub fn validate(&self) -> Result<()> {
        let key_pattern = Regex::new(r"^[A-Za-z0-9_-]+$")
            .map_err(|e| ChangieError::config(format!("invalid key pattern: {}", e)))?;

        for (i, custom) in self.custom_choices.iter().enumerate() {
            if !key_pattern.is_match(&custom.key) {
                return Err(ChangieError::config(format!(
                    "custom field key '{}' may only contain letters, digits, '_' and '-'",
                    custom.key
                )));
            }
            if self.custom_choices[..i].iter().any(|c| c.key == custom.key) {
                return Err(ChangieError::config(format!(
                    "custom field key '{}' is declared more than once",
                    custom.key
                )));
            }
            custom.resolve()?;
        }

        Ok(())
    }

    /// Render this configuration as TOML, as written by `changie init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ChangieError::config(e.to_string()))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changie.toml` in current directory
/// 3. `~/.config/.changie.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ChangieError::config(e.to_string()))?;
    config.validate()?;
    tracing::debug!(
        kinds = config.kinds.len(),
        components = config.components.len(),
        custom = config.custom_choices.len(),
        "loaded configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.changes_dir, ".changes");
        assert_eq!(config.unreleased_dir, "unreleased");
        assert_eq!(config.kinds.first().map(String::as_str), Some("Added"));
        assert!(config.components.is_empty());
        assert!(config.custom_choices.is_empty());
    }

    #[test]
    fn test_unreleased_path() {
        let config = Config {
            changes_dir: "Changes".to_string(),
            unreleased_dir: "Unrel".to_string(),
            ..Default::default()
        };
        assert_eq!(config.unreleased_path(), Path::new("Changes").join("Unrel"));
    }

    #[test]
    fn test_partial_file_keeps_directory_defaults() {
        let config: Config = toml::from_str("kinds = [\"A\", \"B\"]").unwrap();
        assert_eq!(config.changes_dir, ".changes");
        assert_eq!(config.kinds, vec!["A", "B"]);
    }

    #[test]
    fn test_validate_rejects_bad_key() {
        let config = Config {
            custom_choices: vec![Custom::string("has space", "a")],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ChangieError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_key() {
        let config = Config {
            custom_choices: vec![Custom::string("issue", "a"), Custom::int("issue", "b")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let config = Config {
            custom_choices: vec![Custom {
                key: "check".to_string(),
                field_type: "float".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = Config {
            components: vec!["cli".to_string()],
            custom_choices: vec![Custom::int("issue", "Issue")],
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
