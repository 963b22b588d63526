//! Installed package lookup

#[cfg(test)]
use mockall::automock;

use std::path::PathBuf;

use tracing::debug;

use crate::config::installed_manifest_path;
use crate::error::CheckError;
use crate::parser::package_json::PackageJsonParser;

/// Trait for finding the installed version of a package
#[cfg_attr(test, automock)]
pub trait InstalledPackages {
    /// Get the installed version of a package
    ///
    /// # Returns
    /// * `Ok(Some(version))` - The package is installed at `version`
    /// * `Ok(None)` - The package is not installed
    /// * `Err(CheckError)` - The package descriptor exists but cannot be read
    fn installed_version(&self, package_name: &str) -> Result<Option<String>, CheckError>;
}

/// Installed packages under `<project>/node_modules`
#[derive(Debug, Clone)]
pub struct NodeModules {
    project_path: PathBuf,
}

impl NodeModules {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
        }
    }
}

impl InstalledPackages for NodeModules {
    fn installed_version(&self, package_name: &str) -> Result<Option<String>, CheckError> {
        let path = installed_manifest_path(&self.project_path, package_name);
        if !path.is_file() {
            debug!("{} is not installed", package_name);
            return Ok(None);
        }

        let content = std::fs::read(&path).map_err(|source| CheckError::Io {
            path: path.clone(),
            source,
        })?;

        // A corrupt descriptor is a broken install, not a missing one
        let version = PackageJsonParser::parse_installed_version(content).map_err(|source| {
            CheckError::InstalledPackageParse {
                package: package_name.to_string(),
                path,
                source,
            }
        })?;

        debug!("{} is installed at {}", package_name, version);
        Ok(Some(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn install(root: &Path, package_name: &str, content: impl AsRef<[u8]>) {
        let dir = root.join("node_modules").join(package_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), content).unwrap();
    }

    #[test]
    fn installed_version_reads_package_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        install(
            temp_dir.path(),
            "lodash",
            r#"{"name": "lodash", "version": "4.17.21"}"#,
        );

        let installed = NodeModules::new(temp_dir.path());

        assert_eq!(
            installed.installed_version("lodash").unwrap(),
            Some("4.17.21".to_string())
        );
    }

    #[test]
    fn installed_version_reads_scoped_package() {
        let temp_dir = TempDir::new().unwrap();
        install(
            temp_dir.path(),
            "@types/node",
            r#"{"name": "@types/node", "version": "20.11.5"}"#,
        );

        let installed = NodeModules::new(temp_dir.path());

        assert_eq!(
            installed.installed_version("@types/node").unwrap(),
            Some("20.11.5".to_string())
        );
    }

    #[test]
    fn installed_version_returns_none_when_absent() {
        let temp_dir = TempDir::new().unwrap();

        let installed = NodeModules::new(temp_dir.path());

        assert_eq!(installed.installed_version("lodash").unwrap(), None);
    }

    #[test]
    fn installed_version_returns_none_for_directory_without_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("node_modules").join("lodash")).unwrap();

        let installed = NodeModules::new(temp_dir.path());

        assert_eq!(installed.installed_version("lodash").unwrap(), None);
    }

    #[test]
    fn installed_version_fails_on_corrupt_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "lodash", "{ this is not json");

        let installed = NodeModules::new(temp_dir.path());
        let err = installed.installed_version("lodash").unwrap_err();

        assert!(
            matches!(err, CheckError::InstalledPackageParse { ref package, .. } if package == "lodash")
        );
    }

    #[test]
    fn installed_version_fails_on_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "lodash", b"{\"version\": \"4.17.\xff\"}");

        let installed = NodeModules::new(temp_dir.path());

        assert!(matches!(
            installed.installed_version("lodash"),
            Err(CheckError::InstalledPackageParse { .. })
        ));
    }

    #[test]
    fn installed_version_fails_when_version_field_missing() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "lodash", r#"{"name": "lodash"}"#);

        let installed = NodeModules::new(temp_dir.path());

        assert!(matches!(
            installed.installed_version("lodash"),
            Err(CheckError::InstalledPackageParse { .. })
        ));
    }
}
