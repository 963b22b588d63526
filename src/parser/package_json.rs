//! package.json parser

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::manifest_path;
use crate::error::CheckError;
use crate::parser::types::Manifest;

/// Descriptor of an installed package, only the version is read
#[derive(Debug, Deserialize)]
struct InstalledPackageJson {
    version: String,
}

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse a project descriptor into its dependency sections.
    ///
    /// Content that is not UTF-8 is a parse error like any other malformed JSON.
    pub fn parse_manifest(content: impl AsRef<[u8]>) -> Result<Manifest, serde_json::Error> {
        serde_json::from_slice(content.as_ref())
    }

    /// Parse an installed package descriptor and return its `version` field
    pub fn parse_installed_version(
        content: impl AsRef<[u8]>,
    ) -> Result<String, serde_json::Error> {
        serde_json::from_slice::<InstalledPackageJson>(content.as_ref())
            .map(|package| package.version)
    }
}

/// Read the package.json at the root of `project_path`.
///
/// Only `project_path` itself is looked at, parent directories are not searched.
pub fn read_manifest(project_path: &Path) -> Result<Manifest, CheckError> {
    let path = manifest_path(project_path);
    if !path.is_file() {
        return Err(CheckError::ManifestNotFound {
            path: project_path.to_path_buf(),
        });
    }

    let content = std::fs::read(&path).map_err(|source| CheckError::Io {
        path: path.clone(),
        source,
    })?;

    let manifest = PackageJsonParser::parse_manifest(content)
        .map_err(|source| CheckError::ManifestParse { path: path.clone(), source })?;

    debug!(
        "Read {}: {} dependencies, {} devDependencies",
        path.display(),
        manifest.dependencies.len(),
        manifest.dev_dependencies.len()
    );

    Ok(manifest)
}
