//! Reconciliation of declared and installed dependency versions

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::CheckOptions;
use crate::error::CheckError;
use crate::install::{InstallCommand, Installer, ProcessInstaller};
use crate::installed::{InstalledPackages, NodeModules};
use crate::parser::package_json::read_manifest;
use crate::parser::types::DeclaredDependencies;
use crate::version::matcher::{NpmVersionMatcher, VersionMatcher};

/// A declared dependency that is not installed or whose installed version
/// does not satisfy the declared constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingDependency {
    /// Name of the dependency
    pub package_name: String,
    /// Version constraint from package.json
    pub specified_version: String,
    /// Version found in node_modules, `None` when the package is not installed
    pub installed_version: Option<String>,
}

impl fmt::Display for MissingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.installed_version {
            None => write!(
                f,
                "{} (not installed, should be {})",
                self.package_name, self.specified_version
            ),
            Some(installed) => write!(
                f,
                "{} (installed: {}, should be {})",
                self.package_name, installed, self.specified_version
            ),
        }
    }
}

/// Result of a check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every declared dependency is satisfied
    Satisfied,
    /// Discrepancies were found and no install command was given
    Missing(Vec<MissingDependency>),
    /// Discrepancies were found and the install command exited successfully.
    /// The installed packages are not checked again.
    Installed(Vec<MissingDependency>),
}

impl CheckOutcome {
    /// The discrepancies left for the caller: `None` when satisfied or installed
    pub fn into_missing(self) -> Option<Vec<MissingDependency>> {
        match self {
            CheckOutcome::Missing(missing) => Some(missing),
            CheckOutcome::Satisfied | CheckOutcome::Installed(_) => None,
        }
    }
}

/// Compares declared dependencies with installed packages and optionally
/// runs an installer when they differ
pub struct Reconciler<'a> {
    installed: &'a dyn InstalledPackages,
    matcher: &'a dyn VersionMatcher,
    installer: &'a dyn Installer,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        installed: &'a dyn InstalledPackages,
        matcher: &'a dyn VersionMatcher,
        installer: &'a dyn Installer,
    ) -> Self {
        Self {
            installed,
            matcher,
            installer,
        }
    }

    /// Returns one entry per declared dependency that is not satisfied, in
    /// declaration order
    pub fn find_missing(
        &self,
        declared: &DeclaredDependencies,
    ) -> Result<Vec<MissingDependency>, CheckError> {
        let mut missing = Vec::new();

        for (package_name, constraint) in declared {
            let installed_version = self.installed.installed_version(package_name)?;

            if let Some(version) = &installed_version {
                let satisfied = self.matcher.satisfies(version, constraint).map_err(|_| {
                    CheckError::InvalidConstraint {
                        package: package_name.clone(),
                        constraint: constraint.clone(),
                    }
                })?;
                debug!(
                    "{}: installed {}, declared {:?}, satisfied: {}",
                    package_name, version, constraint, satisfied
                );
                if satisfied {
                    continue;
                }
            }

            missing.push(MissingDependency {
                package_name: package_name.clone(),
                specified_version: constraint.clone(),
                installed_version,
            });
        }

        Ok(missing)
    }

    /// Checks `declared` and, if anything is missing and `install` is given,
    /// runs the install command in `project_path`
    pub fn reconcile(
        &self,
        declared: &DeclaredDependencies,
        install: Option<&InstallCommand>,
        project_path: &Path,
    ) -> Result<CheckOutcome, CheckError> {
        let missing = self.find_missing(declared)?;
        info!(
            "{} of {} dependencies need attention",
            missing.len(),
            declared.len()
        );

        if missing.is_empty() {
            return Ok(CheckOutcome::Satisfied);
        }

        let Some(command) = install else {
            return Ok(CheckOutcome::Missing(missing));
        };

        self.installer.install(command, project_path)?;
        Ok(CheckOutcome::Installed(missing))
    }
}

/// Runs a check on the project described by `options`
pub fn check(options: &CheckOptions) -> Result<CheckOutcome, CheckError> {
    check_with(options, &ProcessInstaller::default())
}

/// Like [`check`], remediating through `installer`
pub fn check_with(
    options: &CheckOptions,
    installer: &dyn Installer,
) -> Result<CheckOutcome, CheckError> {
    let project_path = options.project_path().map_err(|source| CheckError::Io {
        path: options.path.clone(),
        source,
    })?;

    // Reject a malformed command before doing any work
    let install = options
        .install
        .as_deref()
        .map(InstallCommand::parse)
        .transpose()?;

    let manifest = read_manifest(&project_path)?;
    let declared = manifest.declared(options.check_dev_dependencies);

    let installed = NodeModules::new(&project_path);
    Reconciler::new(&installed, &NpmVersionMatcher, installer).reconcile(
        &declared,
        install.as_ref(),
        &project_path,
    )
}

/// Checks that every dependency is installed and satisfies its declared version.
///
/// Returns the problematic dependencies, or `None` when there are none or the
/// install command fixed them.
pub fn just_check(options: &CheckOptions) -> Result<Option<Vec<MissingDependency>>, CheckError> {
    check(options).map(CheckOutcome::into_missing)
}
