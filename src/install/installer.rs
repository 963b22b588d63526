//! Installer trait and the child process implementation

#[cfg(test)]
use mockall::automock;

use std::path::Path;

use tracing::{info, warn};

use crate::error::CheckError;
use crate::install::command::InstallCommand;
use crate::install::launcher::Launcher;

/// Trait for running an install command to completion
#[cfg_attr(test, automock)]
pub trait Installer {
    /// Runs `command` in `project_path` and blocks until it exits
    ///
    /// # Returns
    /// * `Ok(())` - The command exited with status 0
    /// * `Err(CheckError::InstallFailed)` - The command exited with another status
    /// * `Err(CheckError::InstallSpawn)` - The command could not be started
    fn install(&self, command: &InstallCommand, project_path: &Path) -> Result<(), CheckError>;
}

/// Installer that runs the command as a child process sharing the caller's terminal
#[derive(Debug, Clone, Copy)]
pub struct ProcessInstaller {
    launcher: Launcher,
}

impl ProcessInstaller {
    pub fn new(launcher: Launcher) -> Self {
        Self { launcher }
    }
}

impl Default for ProcessInstaller {
    fn default() -> Self {
        Self::new(Launcher::for_host())
    }
}

impl Installer for ProcessInstaller {
    fn install(&self, command: &InstallCommand, project_path: &Path) -> Result<(), CheckError> {
        info!(
            "Running {:?} in {} ({:?})",
            command.raw(),
            project_path.display(),
            self.launcher
        );

        let status = self
            .launcher
            .build(command, project_path)
            .status()
            .map_err(|source| CheckError::InstallSpawn {
                command: command.raw().to_string(),
                source,
            })?;

        if status.success() {
            info!("{:?} finished successfully", command.raw());
            Ok(())
        } else {
            warn!("{:?} failed: {}", command.raw(), status);
            Err(CheckError::InstallFailed {
                command: command.raw().to_string(),
                code: status.code(),
            })
        }
    }
}
