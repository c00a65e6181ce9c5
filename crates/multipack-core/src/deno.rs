//! Deno manifest editing.
//!
//! For Deno projects "installing" a package means adding an import alias to
//! `deno.json` rather than spawning a manager process.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from manifest editing.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No manifest exists at the given path. One is never created.
    #[error("no deno.json found at {0}")]
    NotFound(String),

    /// The manifest could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The existing manifest is not valid JSON. It is left untouched.
    #[error("malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// The manifest parses but its shape is wrong for an imports edit.
    #[error("manifest {0} is not editable: expected an object with an object 'imports'")]
    NotAnObject(String),
}

/// Add `imports[package] = "npm:<package>"` to an existing `deno.json`.
///
/// A missing manifest is reported as [`ManifestError::NotFound`]; a manifest
/// that fails to parse is left untouched. Key order of existing entries is
/// preserved only as far as the JSON object representation allows; the
/// rewrite is always valid, pretty-printed JSON.
pub fn add_import(manifest_path: &Path, package: &str) -> Result<(), ManifestError> {
    if !manifest_path.exists() {
        return Err(ManifestError::NotFound(
            manifest_path.display().to_string(),
        ));
    }

    let raw = std::fs::read_to_string(manifest_path)?;
    let mut manifest: Value = serde_json::from_str(&raw)?;

    {
        let root = manifest
            .as_object_mut()
            .ok_or_else(|| ManifestError::NotAnObject(manifest_path.display().to_string()))?;
        let imports = root
            .entry("imports")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| ManifestError::NotAnObject(manifest_path.display().to_string()))?;
        imports.insert(package.to_string(), Value::String(format!("npm:{package}")));
    }

    let pretty = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(manifest_path, pretty + "\n")?;

    tracing::debug!("added {package} to {}", manifest_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn appends_import_preserving_existing_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deno.json");
        fs::write(&path, r#"{"imports": {"x": "npm:x"}}"#).unwrap();

        add_import(&path, "y").unwrap();

        let manifest: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(manifest["imports"]["x"], "npm:x");
        assert_eq!(manifest["imports"]["y"], "npm:y");
    }

    #[test]
    fn creates_imports_mapping_when_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deno.json");
        fs::write(&path, r#"{"tasks": {"dev": "deno run main.ts"}}"#).unwrap();

        add_import(&path, "left-pad").unwrap();

        let manifest: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(manifest["imports"]["left-pad"], "npm:left-pad");
        assert_eq!(manifest["tasks"]["dev"], "deno run main.ts");
    }

    #[test]
    fn missing_manifest_is_never_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deno.json");

        let err = add_import(&path, "left-pad").unwrap_err();

        assert!(matches!(err, ManifestError::NotFound(_)));
        assert!(!path.exists());
    }

    #[test]
    fn malformed_manifest_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deno.json");
        fs::write(&path, "{ not json").unwrap();

        let err = add_import(&path, "left-pad").unwrap_err();

        assert!(matches!(err, ManifestError::Parse(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn non_object_imports_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deno.json");
        fs::write(&path, r#"{"imports": "oops"}"#).unwrap();

        let err = add_import(&path, "left-pad").unwrap_err();

        assert!(matches!(err, ManifestError::NotAnObject(_)));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"imports": "oops"}"#
        );
    }
}
