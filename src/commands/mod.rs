//! Command-line plumbing for the `repo-traffic` tool.

mod update;

pub use crate::commands::update::{UpdateArgs, run_update};
