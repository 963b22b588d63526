use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Project layout constants
// =============================================================================

/// Name of the project descriptor, both at the project root and inside each
/// installed package directory
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Directory holding installed packages, one subdirectory per package name
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Command used when `--install` is given without a value
pub const DEFAULT_INSTALL_COMMAND: &str = "npm install";

/// Environment variable holding the log filter. Logging is disabled when unset.
pub const LOG_ENV_VAR: &str = "JUST_CHECK_LOG";

/// Options for a single check run
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckOptions {
    /// Command run when discrepancies are found. `None` only checks.
    pub install: Option<String>,
    /// Whether devDependencies are checked along with dependencies
    pub check_dev_dependencies: bool,
    /// Project root, relative paths are resolved against the current directory
    pub path: PathBuf,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            install: None,
            check_dev_dependencies: true,
            path: PathBuf::from("."),
        }
    }
}

impl CheckOptions {
    /// Creates options that check the project at `path` with the defaults
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_install(mut self, command: impl Into<String>) -> Self {
        self.install = Some(command.into());
        self
    }

    pub fn with_dev_dependencies(mut self, check: bool) -> Self {
        self.check_dev_dependencies = check;
        self
    }

    /// Returns the project root as an absolute path
    pub fn project_path(&self) -> std::io::Result<PathBuf> {
        std::path::absolute(&self.path)
    }
}

/// Returns the path to the project descriptor under `project_path`
pub fn manifest_path(project_path: &Path) -> PathBuf {
    project_path.join(MANIFEST_FILE_NAME)
}

/// Returns the path to the descriptor of an installed package
pub fn installed_manifest_path(project_path: &Path, package_name: &str) -> PathBuf {
    project_path
        .join(DEPENDENCY_CACHE_DIR)
        .join(package_name)
        .join(MANIFEST_FILE_NAME)
}

/// Returns the path to the data directory for just-check.
/// Uses $XDG_DATA_HOME/just-check if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/just-check,
/// or ./just-check if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("just-check.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("just-check")
}
