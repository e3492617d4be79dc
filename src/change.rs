//! The change entity: one changelog entry stored as its own YAML file.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ChangieError, Result};
use crate::storage::{self, Reader, Writer, CHANGE_FILE_MODE};

/// Extension of every change file.
pub const CHANGE_FILE_EXTENSION: &str = "yaml";

/// A single changelog entry.
///
/// Empty `component` and `kind` mean "unset" and are left out of the file.
/// Field declaration order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    pub body: String,

    #[serde(with = "rfc3339_nanos", default = "unix_epoch")]
    pub time: DateTime<FixedOffset>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
}

fn unix_epoch() -> DateTime<FixedOffset> {
    Utc.timestamp_nanos(0).fixed_offset()
}

/// RFC 3339 with nanosecond precision, `Z` for UTC.
///
/// The fraction keeps only its significant digits (`.1`, `.73617124`) and is
/// left out entirely on whole seconds, so parsed files re-serialize unchanged.
mod rfc3339_nanos {
    use chrono::{DateTime, FixedOffset, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(time: &DateTime<FixedOffset>) -> String {
        let mut text = time.format("%Y-%m-%dT%H:%M:%S").to_string();

        // Leap seconds are carried as nanos past 1e9.
        let nanos = time.nanosecond() % 1_000_000_000;
        if nanos != 0 {
            let fraction = format!("{:09}", nanos);
            text.push('.');
            text.push_str(fraction.trim_end_matches('0'));
        }

        if time.offset().local_minus_utc() == 0 {
            text.push('Z');
        } else {
            text.push_str(&time.format("%:z").to_string());
        }
        text
    }

    pub fn serialize<S>(time: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text).map_err(serde::de::Error::custom)
    }
}

impl Change {
    /// Create a change with the given body, stamped with the current local time.
    pub fn new(body: impl Into<String>) -> Self {
        Change {
            component: String::new(),
            kind: String::new(),
            body: body.into(),
            time: Local::now().fixed_offset(),
            custom: BTreeMap::new(),
        }
    }

    /// Serialize to the change file format.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse a change from raw file contents.
    pub fn from_yaml(bytes: &[u8]) -> Result<Change> {
        Ok(serde_yaml::from_slice(bytes)?)
    }

    /// Load a change file through `reader`.
    ///
    /// # Returns
    /// * `Ok(Change)` - The parsed change
    /// * `Err(ChangieError::Io)` - The reader's own error, unchanged
    /// * `Err(ChangieError::Parse)` - The contents are not a change file
    pub fn load<R: Reader + ?Sized>(path: &Path, reader: &R) -> Result<Change> {
        let bytes = reader.read(path)?;
        let change = Change::from_yaml(&bytes)?;
        tracing::debug!(path = %path.display(), "loaded change");
        Ok(change)
    }

    /// File name derived from component, kind and the time to the second,
    /// e.g. `cli-Added-20160524-033010.yaml`.
    ///
    /// Two changes made in the same second with the same component and kind
    /// derive the same name.
    pub fn file_name(&self) -> String {
        let mut name = String::new();
        if !self.component.is_empty() {
            name.push_str(&self.component);
            name.push('-');
        }
        if !self.kind.is_empty() {
            name.push_str(&self.kind);
            name.push('-');
        }
        name.push_str(&self.time.format("%Y%m%d-%H%M%S").to_string());
        name.push('.');
        name.push_str(CHANGE_FILE_EXTENSION);
        name
    }

    /// Write this change into the unreleased directory.
    ///
    /// # Arguments
    /// * `writer` - Destination for the serialized bytes
    /// * `config` - Supplies `changes_dir` and `unreleased_dir`
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - The path that was written
    /// * `Err` - Serialization failure, or the writer's error unchanged
    pub fn save_unreleased<W: Writer + ?Sized>(
        &self,
        writer: &W,
        config: &Config,
    ) -> Result<PathBuf> {
        let contents = self.to_yaml()?;
        let path = config.unreleased_path().join(self.file_name());
        writer.write(&path, contents.as_bytes(), CHANGE_FILE_MODE)?;
        tracing::debug!(path = %path.display(), "saved unreleased change");
        Ok(path)
    }

    /// Check a change built without prompting against the configuration.
    ///
    /// Applies the same rules as the interactive collector: component and kind
    /// must be configured values, the body must not be empty and every custom
    /// value must belong to a declared field and satisfy its type. Custom values
    /// are replaced by the form the collector would store, so `" 007"` for an
    /// int field becomes `"7"`.
    pub fn validate(&mut self, config: &Config) -> Result<()> {
        check_choice("component", &self.component, &config.components)?;
        check_choice("kind", &self.kind, &config.kinds)?;
        check_body(&self.body)?;

        for (key, value) in self.custom.iter_mut() {
            let custom = config
                .custom_choices
                .iter()
                .find(|c| &c.key == key)
                .ok_or_else(|| {
                    ChangieError::validation(format!("'{}' is not a declared custom field", key))
                })?;
            *value = custom.validate_value(value)?;
        }

        Ok(())
    }
}

/// An empty value is only allowed when nothing is configured.
pub(crate) fn check_choice(field: &str, value: &str, allowed: &[String]) -> Result<()> {
    if allowed.is_empty() {
        if value.is_empty() {
            return Ok(());
        }
        return Err(ChangieError::validation(format!(
            "{} '{}' given but no {}s are configured",
            field, value, field
        )));
    }

    if allowed.iter().any(|a| a == value) {
        Ok(())
    } else {
        Err(ChangieError::validation(format!(
            "{} '{}' is not one of [{}]",
            field,
            value,
            allowed.join(", ")
        )))
    }
}

pub(crate) fn check_body(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(ChangieError::validation("body must not be empty"));
    }
    Ok(())
}

/// Load every change in the unreleased directory.
///
/// Files are read through `reader`; the first unreadable or malformed file
/// aborts the batch. The result is in file name order, not sorted.
pub fn load_unreleased<R: Reader + ?Sized>(config: &Config, reader: &R) -> Result<Vec<Change>> {
    let dir = config.unreleased_path();
    let paths = storage::list_yaml_files(&dir)?;
    tracing::debug!(dir = %dir.display(), files = paths.len(), "loading unreleased changes");

    paths
        .iter()
        .map(|path| Change::load(path, reader))
        .collect()
}
