//! multipack - install npm packages with whatever manager the project uses
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
//!
//! Searches the npm registry, detects whether a project uses bun, pnpm,
//! yarn, npm, or deno, runs the matching install command, and keeps a
//! bounded history of installs in `~/.multipack/state.db`.

pub mod cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use multipack_core::PackageManagerKind;

#[derive(Debug, Parser)]
#[command(name = "multipack")]
#[command(author, version, about = "multipack - one install command for bun/pnpm/yarn/npm/deno")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install packages with the project's package manager
    Install {
        /// Package name(s) to install
        #[arg(required = true)]
        packages: Vec<String>,
        /// Project directory (defaults to the current directory)
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Skip detection and use this manager
        #[arg(long)]
        manager: Option<PackageManagerKind>,
    },
    /// Show which package manager the project uses
    Detect {
        /// Project directory (defaults to the current directory)
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Search the npm registry for packages
    Search {
        /// Search query (at least 2 characters)
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// View recent package installations
    History {
        /// Reset the install history
        #[arg(long)]
        clear: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
