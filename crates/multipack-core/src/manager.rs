//! Closed enumeration of supported package managers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a manager name is not in the supported set.
#[derive(Error, Debug)]
#[error("unsupported package manager: {0}")]
pub struct ParseManagerError(String);

/// The package managers multipack knows how to drive.
///
/// Deliberately closed: install invocations are derived from this enum, so an
/// arbitrary string can never reach the shell. Variant order is the probe
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    /// bun (`bun add`)
    Bun,
    /// pnpm (`pnpm add`)
    Pnpm,
    /// yarn (`yarn add`)
    Yarn,
    /// npm (`npm install`)
    Npm,
    /// deno (edits `deno.json` imports instead of spawning)
    Deno,
}

impl PackageManagerKind {
    /// All kinds, in executable probe priority order.
    pub const ALL: [Self; 5] = [Self::Bun, Self::Pnpm, Self::Yarn, Self::Npm, Self::Deno];

    /// Executable name on `PATH`.
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Bun => "bun",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Npm => "npm",
            Self::Deno => "deno",
        }
    }

    /// Arguments for installing `package`, or `None` for Deno, which takes
    /// the manifest-edit path instead of a subprocess.
    #[must_use]
    pub fn install_args(self, package: &str) -> Option<Vec<String>> {
        let subcommand = match self {
            Self::Bun | Self::Pnpm | Self::Yarn => "add",
            Self::Npm => "install",
            Self::Deno => return None,
        };
        Some(vec![subcommand.to_string(), package.to_string()])
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PackageManagerKind {
    type Err = ParseManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bun" => Ok(Self::Bun),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            "npm" => Ok(Self::Npm),
            "deno" => Ok(Self::Deno),
            other => Err(ParseManagerError(other.to_string())),
        }
    }
}
