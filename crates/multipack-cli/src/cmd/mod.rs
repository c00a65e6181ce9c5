//! Command modules - one file per CLI command

pub mod completions;
pub mod detect;
pub mod history;
pub mod install;
pub mod search;
