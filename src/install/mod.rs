//! Remediation layer: runs the external install command
//! - command.rs: Install command tokenizer
//! - launcher.rs: Host specific process launch strategy
//! - installer.rs: Installer trait and the child process implementation

pub mod command;
pub mod installer;
pub mod launcher;

pub use command::InstallCommand;
pub use installer::{Installer, ProcessInstaller};
pub use launcher::Launcher;
