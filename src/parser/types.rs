//! Common types for parsers

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Package name to version constraint, in declaration order
pub type DeclaredDependencies = IndexMap<String, String>;

/// The dependency sections of a project's package.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: DeclaredDependencies,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dev_dependencies: DeclaredDependencies,
}

impl Manifest {
    /// Returns the dependencies to check.
    ///
    /// devDependencies are merged after dependencies, so a name declared in both
    /// keeps its dependencies position but takes the devDependencies constraint.
    pub fn declared(&self, include_dev: bool) -> DeclaredDependencies {
        let mut declared = self.dependencies.clone();
        if include_dev {
            for (name, constraint) in &self.dev_dependencies {
                declared.insert(name.clone(), constraint.clone());
            }
        }
        declared
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<DeclaredDependencies, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DeclaredDependencies>::deserialize(deserializer)?.unwrap_or_default())
}

/// Splits an npm alias (`npm:package@range`) into the aliased package and its range.
///
/// A bare `npm:package` has no range and matches any version.
pub fn parse_npm_alias(value: &str) -> Option<(&str, &str)> {
    let rest = value.strip_prefix("npm:")?;

    // The name of a scoped package starts with '@', the range follows the next '@'
    let search_from = usize::from(rest.starts_with('@'));
    match rest[search_from..].find('@') {
        Some(at_pos) => {
            let at_pos = search_from + at_pos;
            Some((&rest[..at_pos], &rest[at_pos + 1..]))
        }
        None => Some((rest, "")),
    }
}
