//! Install command

use std::path::Path;

use anyhow::{Context, Result};
use multipack_core::detect::ManagerCache;
use multipack_core::history;
use multipack_core::install::{InstallOutcome, install_package};
use multipack_core::manager::PackageManagerKind;
use multipack_core::store::StateDb;

/// Install each package with the detected (or overridden) manager and record
/// every success in the history log.
pub fn install(
    packages: &[String],
    dir: &Path,
    manager_override: Option<PackageManagerKind>,
) -> Result<()> {
    // Detection probes the filesystem and spawns version queries; one result
    // serves the whole invocation.
    let mut cache = ManagerCache::new();

    for package in packages {
        anyhow::ensure!(!package.is_empty(), "no package name provided");

        let manager = match manager_override {
            Some(kind) => kind,
            None => cache
                .resolve(dir)
                .context("No supported package manager detected")?,
        };
        tracing::debug!("using {manager} for {package}");

        println!("Installing {package} with {manager}...");

        let outcome = install_package(manager, package, dir)
            .with_context(|| format!("Failed to install {package} with {manager}"))?;

        match outcome {
            InstallOutcome::CommandRun { .. } => {
                // Manifest edits are not manager installs; only completed
                // install commands enter the history log.
                let mut db = StateDb::open().context("Failed to open state database")?;
                history::record_install(&mut db, package, manager, None)
                    .context("Failed to record install history")?;
                println!("{package} installed successfully with {manager}!");
            }
            InstallOutcome::ManifestEdited => {
                println!("Added {package} to deno.json imports.");
            }
        }
    }

    Ok(())
}
