//! Command workflows
//!
//! The logic behind each subcommand, kept apart from clap so the workflows
//! can be driven programmatically with in-memory prompters and storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::change::{self, Change};
use crate::config::Config;
use crate::prompt::{self, Prompter};
use crate::sort::ChangeSorter;
use crate::storage::{Reader, Writer};

/// Arguments for the `new` workflow
///
/// Mirrors the CLI flags. When `body` is set the change is built from the
/// flags alone and no prompt is shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewChangeArgs {
    pub component: Option<String>,
    pub kind: Option<String>,
    pub body: Option<String>,
    pub custom: Vec<(String, String)>,
}

impl NewChangeArgs {
    fn is_interactive(&self) -> bool {
        self.body.is_none()
    }
}

/// Parse a `key=value` pair given on the command line.
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Create a new change and write it to the unreleased directory.
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written change file
/// * `Err` - Prompt cancelled, validation failed or the write failed
pub fn run_new<P, W>(
    args: NewChangeArgs,
    config: &Config,
    prompter: &mut P,
    writer: &W,
) -> Result<PathBuf>
where
    P: Prompter + ?Sized,
    W: Writer + ?Sized,
{
    let change = if args.is_interactive() {
        if args.component.is_some() || args.kind.is_some() || !args.custom.is_empty() {
            bail!("--component, --kind and --custom require --body");
        }
        prompt::ask_prompts(config, prompter).context("Failed to collect change")?
    } else {
        let mut custom = BTreeMap::new();
        for (key, value) in args.custom {
            if custom.insert(key.clone(), value).is_some() {
                bail!("custom field '{}' given more than once", key);
            }
        }

        let mut change = Change::new(args.body.unwrap_or_default());
        change.component = args.component.unwrap_or_default();
        change.kind = args.kind.unwrap_or_default();
        change.custom = custom;
        change.validate(config).context("Invalid change")?;
        change
    };

    let path = change
        .save_unreleased(writer, config)
        .context("Failed to save change")?;
    tracing::info!(path = %path.display(), "created change");
    Ok(path)
}

/// Load all unreleased changes and sort them by the configured order.
pub fn run_list<R: Reader + ?Sized>(config: &Config, reader: &R) -> Result<Vec<Change>> {
    let mut changes =
        change::load_unreleased(config, reader).context("Failed to load unreleased changes")?;
    ChangeSorter::new(config).sort(&mut changes);
    Ok(changes)
}

/// Write a config file and create the unreleased directory.
///
/// Directories in `config` are relative to the working directory, the same
/// way every other command resolves them.
///
/// Refuses to replace an existing config file unless `force` is set.
pub fn run_init(config_path: &Path, config: &Config, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists, use --force to overwrite it",
            config_path.display()
        );
    }

    let unreleased = config.unreleased_path();
    fs::create_dir_all(&unreleased)
        .with_context(|| format!("Failed to create {}", unreleased.display()))?;
    fs::write(unreleased.join(".gitkeep"), "")
        .with_context(|| format!("Failed to write .gitkeep in {}", unreleased.display()))?;

    fs::write(config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!(path = %config_path.display(), "initialised project");
    Ok(())
}
