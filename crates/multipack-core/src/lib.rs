//! multipack core
//!
//! Detects which JavaScript package manager a project uses, runs its install
//! command, edits `deno.json` imports for Deno projects, searches the npm
//! registry for package suggestions, and keeps a bounded install history in a
//! persisted state database.
//!
//! # Architecture
//!
//! - **Closed enumeration**: [`PackageManagerKind`] is a tagged variant, not
//!   open text. Install commands are derived from it, so an unrecognized
//!   manager can never reach shell invocation.
//! - **Injected store**: history goes through the [`StateStore`] trait so the
//!   recorder is testable without the real `SQLite` database.
//! - **Superseding search**: [`SearchSession`] tags each query with a
//!   generation; late results from stale generations are discarded.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.multipack/
//! └── state.db    # SQLite database (install history)
//! ```

pub mod deno;
pub mod detect;
pub mod history;
pub mod install;
pub mod manager;
pub mod paths;
pub mod registry;
pub mod search;
pub mod store;

pub use detect::{DetectError, ManagerCache, detect};
pub use history::{HISTORY_CAPACITY, InstallEntry, record_install};
pub use install::{InstallOutcome, install_package};
pub use manager::PackageManagerKind;
pub use registry::PackageSuggestion;
pub use search::SearchSession;
pub use store::{StateDb, StateStore};

/// User Agent string for registry requests
pub const USER_AGENT: &str = concat!("multipack/", env!("CARGO_PKG_VERSION"));
