//! Filesystem locations for multipack state.

use dirs::home_dir;
use std::path::PathBuf;

/// Returns the state directory, or None if the user's home cannot be resolved.
pub fn try_multipack_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("MULTIPACK_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".multipack"))
}

/// Returns the canonical state directory (`~/.multipack`).
///
/// # Panics
///
/// Panics if neither `MULTIPACK_HOME` is set nor the user's home directory
/// can be resolved.
pub fn multipack_home() -> PathBuf {
    try_multipack_home()
        .expect("Could not determine home directory. Set MULTIPACK_HOME to override.")
}

/// `SQLite` database path: ~/.multipack/state.db
pub fn db_path() -> PathBuf {
    multipack_home().join("state.db")
}
