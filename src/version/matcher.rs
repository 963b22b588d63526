//! Version matching abstraction

#[cfg(test)]
use mockall::automock;

use crate::parser::types::parse_npm_alias;
use crate::version::error::InvalidRange;
use crate::version::range::VersionRange;
use crate::version::semver::parse_version;

/// Trait for deciding whether an installed version meets a declared constraint
#[cfg_attr(test, automock)]
pub trait VersionMatcher: Send + Sync {
    /// Check if `installed_version` satisfies `constraint`
    ///
    /// An invalid `constraint` is an error. An installed version that cannot be
    /// parsed never satisfies.
    fn satisfies(&self, installed_version: &str, constraint: &str) -> Result<bool, InvalidRange>;
}

/// Matcher for npm range specifications (^1.0.0, ~1.0.0, 1.x, ...)
///
/// Aliases (`npm:other-package@^1.0.0`) are checked against their range.
pub struct NpmVersionMatcher;

impl VersionMatcher for NpmVersionMatcher {
    fn satisfies(&self, installed_version: &str, constraint: &str) -> Result<bool, InvalidRange> {
        let spec = parse_npm_alias(constraint).map_or(constraint, |(_, range)| range);
        let range = VersionRange::parse(spec).map_err(|_| InvalidRange(constraint.to_string()))?;

        Ok(parse_version(installed_version).is_some_and(|version| range.satisfies(&version)))
    }
}
