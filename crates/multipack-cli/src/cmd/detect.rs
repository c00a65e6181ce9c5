//! Detect command

use std::path::Path;

use anyhow::{Context, Result};

/// Print the package manager detected for the project.
pub fn detect(dir: &Path) -> Result<()> {
    let kind = multipack_core::detect(dir)
        .with_context(|| format!("Failed to inspect project at {}", dir.display()))?;
    println!("{kind}");
    Ok(())
}
