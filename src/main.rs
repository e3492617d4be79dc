use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use changie::cli::{self, NewChangeArgs};
use changie::config::{self, Config, CONFIG_FILE_NAME};
use changie::storage::{FsReader, FsWriter};
use changie::ui::{self, TerminalPrompter};

#[derive(Parser)]
#[command(
    name = "changie",
    version,
    about = "Record changelog entries as individual YAML files"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default configuration and create the unreleased directory
    Init {
        #[arg(short, long, help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Create a new change; prompts for every field unless --body is given
    New {
        #[arg(long, help = "Component of the change")]
        component: Option<String>,

        #[arg(short, long, help = "Kind of the change")]
        kind: Option<String>,

        #[arg(short, long, help = "Body of the change; skips all prompts")]
        body: Option<String>,

        #[arg(
            long = "custom",
            value_name = "KEY=VALUE",
            value_parser = cli::parse_key_value,
            help = "Custom field value, may be repeated"
        )]
        custom: Vec<(String, String)>,
    },

    /// List unreleased changes in changelog order
    List,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "changie=debug" } else { "changie=warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    // Logs go to stderr so they never mix with listed changes on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    match args.command {
        Command::Init { force } => {
            let path = PathBuf::from(args.config.as_deref().unwrap_or(CONFIG_FILE_NAME));
            if let Err(e) = cli::run_init(&path, &Config::default(), force) {
                ui::display_error(&format!("{:#}", e));
                std::process::exit(1);
            }
            ui::display_success(&format!("Created {}", path.display()));
        }
        Command::New {
            component,
            kind,
            body,
            custom,
        } => {
            let config = load_config_or_exit(args.config.as_deref());
            let new_args = NewChangeArgs {
                component,
                kind,
                body,
                custom,
            };
            let mut prompter = TerminalPrompter::stdio();
            match cli::run_new(new_args, &config, &mut prompter, &FsWriter) {
                Ok(path) => ui::display_success(&format!("Created {}", path.display())),
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            }
        }
        Command::List => {
            let config = load_config_or_exit(args.config.as_deref());
            let changes = match cli::run_list(&config, &FsReader) {
                Ok(changes) => changes,
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            };
            ui::display_changes(&changes);
        }
    }

    Ok(())
}

fn load_config_or_exit(config_path: Option<&str>) -> Config {
    match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    }
}
