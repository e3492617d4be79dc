//! Custom field definitions.
//!
//! A [`Custom`] is the raw definition read from the config file. Before it is
//! used it is resolved into a [`CustomType`], the closed set of supported
//! field types, each carrying its own parsing and bounds rules.

use serde::{Deserialize, Serialize};

use crate::error::{ChangieError, Result};

pub const CUSTOM_STRING: &str = "string";
pub const CUSTOM_INT: &str = "int";
pub const CUSTOM_ENUM: &str = "enum";

/// A user-declared extra field collected for every change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Custom {
    /// Key used in the change file's `custom` map.
    pub key: String,

    /// One of `string`, `int` or `enum`. Kept as text so an unknown type is
    /// reported when the field is used rather than hiding the whole config.
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_int: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_int: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_options: Vec<String>,
}

/// Resolved type of a custom field.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomType {
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Int {
        min: Option<i64>,
        max: Option<i64>,
    },
    Enum {
        options: Vec<String>,
    },
}

impl Custom {
    /// Create an unbounded string field
    pub fn string(key: impl Into<String>, label: impl Into<String>) -> Self {
        Custom {
            key: key.into(),
            field_type: CUSTOM_STRING.to_string(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Create an unbounded int field
    pub fn int(key: impl Into<String>, label: impl Into<String>) -> Self {
        Custom {
            key: key.into(),
            field_type: CUSTOM_INT.to_string(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Create an enum field over the given options
    pub fn enumeration(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Custom {
            key: key.into(),
            field_type: CUSTOM_ENUM.to_string(),
            label: label.into(),
            enum_options: options,
            ..Default::default()
        }
    }

    /// Text shown when prompting; falls back to the key.
    pub fn prompt_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }

    /// Resolve the textual type into a [`CustomType`].
    ///
    /// # Returns
    /// * `Ok(CustomType)` - The typed definition with its bounds
    /// * `Err(ChangieError::Config)` - Unknown type, or an enum without options
    pub fn resolve(&self) -> Result<CustomType> {
        match self.field_type.as_str() {
            CUSTOM_STRING => Ok(CustomType::String {
                min_length: self.min_length,
                max_length: self.max_length,
            }),
            CUSTOM_INT => Ok(CustomType::Int {
                min: self.min_int,
                max: self.max_int,
            }),
            CUSTOM_ENUM => {
                if self.enum_options.is_empty() {
                    return Err(ChangieError::config(format!(
                        "custom field '{}' is an enum with no options",
                        self.key
                    )));
                }
                Ok(CustomType::Enum {
                    options: self.enum_options.clone(),
                })
            }
            other => Err(ChangieError::config(format!(
                "custom field '{}' has unknown type '{}'",
                self.key, other
            ))),
        }
    }

    /// Resolve the type and check `value` against it.
    pub fn validate_value(&self, value: &str) -> Result<String> {
        self.resolve()?.validate(&self.key, value)
    }
}

impl CustomType {
    /// Parse and bounds-check a raw value, returning the value to store.
    ///
    /// Int values are stored in their canonical decimal form, so `" 007"`
    /// becomes `"7"`.
    pub fn validate(&self, key: &str, value: &str) -> Result<String> {
        match self {
            CustomType::String {
                min_length,
                max_length,
            } => {
                let len = value.chars().count();
                if let Some(min) = min_length {
                    if len < *min {
                        return Err(ChangieError::validation(format!(
                            "'{}' must be at least {} characters, got {}",
                            key, min, len
                        )));
                    }
                }
                if let Some(max) = max_length {
                    if len > *max {
                        return Err(ChangieError::validation(format!(
                            "'{}' must be at most {} characters, got {}",
                            key, max, len
                        )));
                    }
                }
                Ok(value.to_string())
            }
            CustomType::Int { min, max } => {
                let parsed = value.trim().parse::<i64>().map_err(|_| {
                    ChangieError::validation(format!(
                        "'{}' must be an integer, got '{}'",
                        key, value
                    ))
                })?;
                if let Some(min) = min {
                    if parsed < *min {
                        return Err(ChangieError::validation(format!(
                            "'{}' must be at least {}, got {}",
                            key, min, parsed
                        )));
                    }
                }
                if let Some(max) = max {
                    if parsed > *max {
                        return Err(ChangieError::validation(format!(
                            "'{}' must be at most {}, got {}",
                            key, max, parsed
                        )));
                    }
                }
                Ok(parsed.to_string())
            }
            CustomType::Enum { options } => {
                if options.iter().any(|o| o == value) {
                    Ok(value.to_string())
                } else {
                    Err(ChangieError::validation(format!(
                        "'{}' must be one of [{}], got '{}'",
                        key,
                        options.join(", "),
                        value
                    )))
                }
            }
        }
    }
}
