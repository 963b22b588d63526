use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("No package.json file found in {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse {}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse installed package {package} at {}", .path.display())]
    InstalledPackageParse {
        package: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid version range for {package}: {constraint:?}")]
    InvalidConstraint { package: String, constraint: String },

    #[error("Invalid install command {command:?}: {reason}")]
    InvalidInstallCommand { command: String, reason: String },

    #[error("Failed to start install command {command:?}")]
    InstallSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install missing dependencies ({command:?} {})", exit_description(.code))]
    InstallFailed { command: String, code: Option<i32> },

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}
