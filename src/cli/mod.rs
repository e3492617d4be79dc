//! Command-line workflows

pub mod orchestration;

pub use orchestration::{parse_key_value, run_init, run_list, run_new, NewChangeArgs};
