//! Check that the packages installed in `node_modules` satisfy the version
//! constraints declared in `package.json`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Parser    │────▶│ Reconciler  │────▶│  Installer  │
//! │(package.json│     │   (check)   │     │ (remediate) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                        │        │
//!                        ▼        ▼
//!              ┌─────────────┐ ┌─────────────┐
//!              │  Installed  │ │   Matcher   │
//!              │(node_modules│ │ (npm range) │
//!              └─────────────┘ └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`check`]: Reconciliation of declared and installed versions
//! - [`config`]: Options and conventional file names
//! - [`error`]: Error type shared by every layer
//! - [`install`]: Running the external install command
//! - [`installed`]: Reading installed package versions
//! - [`parser`]: package.json parsing
//! - [`version`]: npm semver range evaluation

pub mod check;
pub mod config;
pub mod error;
pub mod install;
pub mod installed;
pub mod parser;
pub mod version;

pub use check::{CheckOutcome, MissingDependency, Reconciler, check, check_with, just_check};
pub use config::CheckOptions;
pub use error::CheckError;
