//! Package manager detection.
//!
//! Lock files are authoritative evidence of the manager a project actually
//! uses, so they take precedence over which executables happen to be on the
//! host. Only if neither yields an answer does detection fall back to npm as
//! the ecosystem baseline.

use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::manager::PackageManagerKind;

/// Lock/config files that fingerprint a manager, highest priority first.
const LOCK_FILES: [(&str, PackageManagerKind); 5] = [
    ("bun.lockb", PackageManagerKind::Bun),
    ("pnpm-lock.yaml", PackageManagerKind::Pnpm),
    ("yarn.lock", PackageManagerKind::Yarn),
    ("package-lock.json", PackageManagerKind::Npm),
    ("deno.json", PackageManagerKind::Deno),
];

/// Errors from package manager detection.
///
/// Detection only fails when the project root itself cannot be inspected.
/// Probe failures for individual managers degrade to the npm default.
#[derive(Error, Debug)]
pub enum DetectError {
    /// The project root could not be read.
    #[error("cannot read project root {path}: {source}")]
    ProjectRoot {
        /// Path that was probed.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The project root exists but is not a directory.
    #[error("project root {0} is not a directory")]
    NotADirectory(String),
}

/// Detect which package manager the project at `project_root` uses.
///
/// Ordered, first match wins:
/// 1. lock-file probe in fixed priority order,
/// 2. executable probe (`<manager> --version`) in fixed priority order,
/// 3. default to npm.
///
/// Read-only: never mutates the project.
pub fn detect(project_root: &Path) -> Result<PackageManagerKind, DetectError> {
    detect_with(project_root, probe_version)
}

/// [`detect`] with an injected executable probe, for tests.
pub fn detect_with(
    project_root: &Path,
    probe: impl Fn(PackageManagerKind) -> bool,
) -> Result<PackageManagerKind, DetectError> {
    let meta = std::fs::metadata(project_root).map_err(|source| DetectError::ProjectRoot {
        path: project_root.display().to_string(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(DetectError::NotADirectory(
            project_root.display().to_string(),
        ));
    }

    for (lock_file, kind) in LOCK_FILES {
        if project_root.join(lock_file).exists() {
            tracing::debug!("detected {kind} via {lock_file}");
            return Ok(kind);
        }
    }

    for kind in PackageManagerKind::ALL {
        if probe(kind) {
            tracing::debug!("detected {kind} via executable probe");
            return Ok(kind);
        }
    }

    tracing::debug!("no lock file or manager executable found, defaulting to npm");
    Ok(PackageManagerKind::Npm)
}

/// True when the manager's executable is on `PATH` and answers a trivial
/// version query. Spawn failures count as "not available".
fn probe_version(kind: PackageManagerKind) -> bool {
    if which::which(kind.program()).is_err() {
        return false;
    }
    Command::new(kind.program())
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// Session-scoped cache for the resolved manager.
///
/// Detection stats the filesystem and spawns version queries, so callers
/// running several installs memoize the first result here. There is no
/// automatic invalidation on filesystem change; call
/// [`ManagerCache::invalidate`] after adding or removing lock files.
#[derive(Debug, Default)]
pub struct ManagerCache {
    resolved: Option<PackageManagerKind>,
}

impl ManagerCache {
    /// Empty cache; the first [`ManagerCache::resolve`] runs detection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detected manager for `project_root`, memoized after the first call.
    pub fn resolve(&mut self, project_root: &Path) -> Result<PackageManagerKind, DetectError> {
        if let Some(kind) = self.resolved {
            return Ok(kind);
        }
        let kind = detect(project_root)?;
        self.resolved = Some(kind);
        Ok(kind)
    }

    /// Drop the memoized result so the next resolve re-probes.
    pub fn invalidate(&mut self) {
        self.resolved = None;
    }
}
