//! Bounded install history.
//!
//! Insertion-ordered, oldest first. Appending past capacity evicts from the
//! front (strict FIFO, not LRU). Entries are immutable once recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::manager::PackageManagerKind;
use crate::store::{StateStore, StoreError};

/// Maximum number of retained entries; older entries are evicted first.
pub const HISTORY_CAPACITY: usize = 20;

/// Errors from recording install history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Rejected before the store is touched.
    #[error("package name must not be empty")]
    EmptyPackageName,

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One completed installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallEntry {
    /// Name of the installed package.
    pub package_name: String,
    /// Manager that performed the install.
    pub package_manager: PackageManagerKind,
    /// When the install completed.
    pub timestamp: DateTime<Utc>,
}

/// Append a completed install to the persisted history.
///
/// Validates before touching the store: an empty package name fails without
/// mutating persisted state. The updated sequence is written back before
/// returning, so a crash afterwards loses nothing. `timestamp` defaults to
/// now.
pub fn record_install<S: StateStore>(
    store: &mut S,
    package_name: &str,
    package_manager: PackageManagerKind,
    timestamp: Option<DateTime<Utc>>,
) -> Result<InstallEntry, HistoryError> {
    if package_name.is_empty() {
        return Err(HistoryError::EmptyPackageName);
    }

    let entry = InstallEntry {
        package_name: package_name.to_string(),
        package_manager,
        timestamp: timestamp.unwrap_or_else(Utc::now),
    };

    let mut entries = store.get_history()?;
    entries.push(entry.clone());
    // Appends are one-at-a-time, but a shrunk capacity or an oversized
    // stored value still converges here.
    while entries.len() > HISTORY_CAPACITY {
        entries.remove(0);
    }
    store.set_history(&entries)?;

    tracing::debug!(
        "recorded install of {} with {}",
        entry.package_name,
        entry.package_manager
    );
    Ok(entry)
}

/// Reset the persisted history to empty.
pub fn clear<S: StateStore>(store: &mut S) -> Result<(), HistoryError> {
    store.set_history(&[])?;
    Ok(())
}
