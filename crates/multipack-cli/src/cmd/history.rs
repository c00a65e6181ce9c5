//! History command

use anyhow::{Context, Result};
use multipack_core::history;
use multipack_core::store::{StateDb, StateStore};

/// List recent installs, or reset the log with `clear`.
pub fn history(clear: bool) -> Result<()> {
    let mut db = StateDb::open().context("Failed to open state database")?;

    if clear {
        history::clear(&mut db).context("Failed to clear install history")?;
        println!("Install history cleared.");
        return Ok(());
    }

    let entries = db.get_history().context("Failed to load install history")?;

    if entries.is_empty() {
        println!("No package installation history found.");
        return Ok(());
    }

    println!(
        "Recent package installations (up to {}):",
        history::HISTORY_CAPACITY
    );
    for entry in entries {
        let local = entry.timestamp.with_timezone(&chrono::Local);
        println!(
            "[{}] {} (installed with {})",
            local.format("%Y-%m-%d %H:%M:%S"),
            entry.package_name,
            entry.package_manager
        );
    }

    Ok(())
}
