//! Host specific process launch strategy

use std::path::Path;
use std::process::{Command, Stdio};

use crate::install::command::InstallCommand;

/// How the install command is turned into a child process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launcher {
    /// Run the program directly
    Direct,
    /// Run through `cmd.exe /c`, needed on Windows for `.cmd` shims such as `npm.cmd`
    CommandInterpreter,
}

impl Launcher {
    /// Returns the launcher for the operating system this binary runs on
    pub fn for_host() -> Self {
        if cfg!(windows) {
            Launcher::CommandInterpreter
        } else {
            Launcher::Direct
        }
    }

    /// Build the child process for `command`, running in `cwd` with the
    /// caller's stdin, stdout and stderr
    pub fn build(&self, command: &InstallCommand, cwd: &Path) -> Command {
        let mut process = match self {
            Launcher::Direct => Command::new(command.program()),
            Launcher::CommandInterpreter => {
                let mut process = Command::new("cmd.exe");
                process.arg("/c").arg(command.program());
                process
            }
        };

        process
            .args(command.args())
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        process
    }
}
