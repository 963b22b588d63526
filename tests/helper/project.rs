//! Project fixture utilities

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// package.json with lodash as a dependency and jest as a devDependency
pub const TEST_PACKAGE_JSON: &str = r#"{
  "name": "test-package",
  "version": "1.0.0",
  "dependencies": {
    "lodash": "4.17.21"
  },
  "devDependencies": {
    "jest": "29.5.0"
  }
}"#;

/// Temporary project directory
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Creates a project with the given package.json content
    pub fn new(package_json: impl AsRef<[u8]>) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), package_json).unwrap();
        Self { dir }
    }

    /// Creates a project without a package.json
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes node_modules/<name>/package.json with the given version
    pub fn install(&self, name: &str, version: &str) -> &Self {
        self.install_raw(
            name,
            &format!(r#"{{"name": "{name}", "version": "{version}"}}"#),
        )
    }

    /// Writes node_modules/<name>/package.json with arbitrary content
    pub fn install_raw(&self, name: &str, content: impl AsRef<[u8]>) -> &Self {
        let dir = self.path().join("node_modules").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), content).unwrap();
        self
    }

    /// Writes a shell script into the project and returns its file name
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> String {
        fs::write(self.path().join(name), body).unwrap();
        name.to_string()
    }
}
