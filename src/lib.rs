pub mod change;
pub mod cli;
pub mod config;
pub mod custom;
pub mod error;
pub mod prompt;
pub mod sort;
pub mod storage;
pub mod ui;

pub use change::Change;
pub use config::Config;
pub use error::{ChangieError, Result};
pub use prompt::{ask_prompts, Prompter};
pub use sort::ChangeSorter;
