//! Vendor manifest — the generated dependency inventory.
//!
//! The dependency install step writes `vendor/manifest.toml` into the
//! project root. At request time the front controller checks that the file
//! exists, parses it, and feeds the package inventory into the report's
//! Dependencies section. A missing file means the install step was never
//! run — a configuration error, not a crash.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::error::AppError;

/// Fixed suffix appended to the derived project root.
pub const MANIFEST_SUFFIX: &str = "vendor/manifest.toml";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("vendor manifest not found at {0} — run the dependency install step in the project root")]
    Missing(PathBuf),

    #[error("cannot read vendor manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("vendor manifest {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parsed shape of `vendor/manifest.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorManifest {
    /// Tool that produced the manifest, e.g. `"vendor-install 1.4"`.
    #[serde(default)]
    pub generated_by: Option<String>,
    /// RFC3339 timestamp recorded by the generator.
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default, rename = "package")]
    pub packages: Vec<VendorPackage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub checksum: Option<String>,
}

/// Derive the manifest path from the entry binary's location: two directory
/// levels above the binary's directory, plus [`MANIFEST_SUFFIX`].
///
/// For a binary at `<root>/target/release/diagd` this resolves to
/// `<root>/vendor/manifest.toml`. Computed once at startup, never mutated.
pub fn default_manifest_path() -> Result<PathBuf, AppError> {
    let exe = std::env::current_exe()
        .map_err(|e| AppError::Config(format!("cannot resolve entry binary path: {e}")))?;
    let dir = exe.parent().ok_or_else(|| {
        AppError::Config(format!("entry binary {} has no parent directory", exe.display()))
    })?;
    let root = dir.ancestors().nth(2).ok_or_else(|| {
        AppError::Config(format!(
            "cannot resolve project root two levels above {}",
            dir.display()
        ))
    })?;
    Ok(root.join(MANIFEST_SUFFIX))
}

/// Check for the manifest and parse it.
///
/// Read-only — called on every request so a manifest deleted (or restored)
/// between requests is observed immediately.
pub fn load(path: &Path) -> Result<VendorManifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::Missing(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
