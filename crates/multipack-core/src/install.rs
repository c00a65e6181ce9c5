//! Install execution.
//!
//! One blocking invocation of the manager's add/install command in the
//! project directory, stderr captured for diagnostics. Deno never spawns;
//! it goes through the manifest editor.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::deno::{self, ManifestError};
use crate::manager::PackageManagerKind;

/// Errors from running an install.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The manager executable could not be spawned.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Executable that failed to start.
        program: &'static str,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The manager ran but exited with a failure, diagnostics attached.
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        /// Executable that was run.
        program: &'static str,
        /// Exit status of the process.
        status: std::process::ExitStatus,
        /// Captured stderr text.
        stderr: String,
    },

    /// The Deno manifest-edit path failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// How a successful install was carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A manager process ran `add`/`install` and exited cleanly.
    CommandRun {
        /// Executable that was invoked.
        program: &'static str,
    },
    /// `deno.json` gained an import alias; no process was spawned.
    ManifestEdited,
}

/// Install `package` into the project at `project_dir` with `manager`.
///
/// Blocks until the manager exits. History is for the caller to record, and
/// only on success.
pub fn install_package(
    manager: PackageManagerKind,
    package: &str,
    project_dir: &Path,
) -> Result<InstallOutcome, InstallError> {
    let Some(args) = manager.install_args(package) else {
        deno::add_import(&project_dir.join("deno.json"), package)?;
        return Ok(InstallOutcome::ManifestEdited);
    };

    let program = manager.program();
    tracing::info!("running {program} {} in {}", args.join(" "), project_dir.display());

    let output = Command::new(program)
        .args(&args)
        .current_dir(project_dir)
        .output()
        .map_err(|source| InstallError::Spawn { program, source })?;

    if !output.status.success() {
        return Err(InstallError::CommandFailed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    tracing::info!("installed {package} with {manager}");
    Ok(InstallOutcome::CommandRun { program })
}
