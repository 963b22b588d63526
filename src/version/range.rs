//! npm version range
//!
//! Supports the npm semver range grammar:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3`, `~>1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `1`, `*`, `` - wildcards and partial versions
//! - `1.2.3 - 2.3.4` - hyphen ranges
//! - `>=1.0.0 <2.0.0` - space separated, all must satisfy
//! - `^1.0.0 || ^2.0.0` - any must satisfy
//!
//! Every range is desugared into sets of primitive comparators. A version with
//! a prerelease tag only satisfies a set that has a comparator with a
//! prerelease on the same `major.minor.patch`.

use semver::{Prerelease, Version};

use crate::version::error::InvalidRange;
use crate::version::semver::PartialVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => version == &self.version,
            Op::Gt => version > &self.version,
            Op::Gte => version >= &self.version,
            Op::Lt => version < &self.version,
            Op::Lte => version <= &self.version,
        }
    }
}

/// A parsed npm version range: any of its comparator sets must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    /// All comparators of a set must match. An empty set matches any version.
    sets: Vec<Vec<Comparator>>,
}

impl VersionRange {
    /// Parse a version range string
    pub fn parse(spec: &str) -> Result<Self, InvalidRange> {
        spec.split("||")
            .map(parse_comparator_set)
            .collect::<Option<Vec<_>>>()
            .map(|sets| Self { sets })
            .ok_or_else(|| InvalidRange(spec.to_string()))
    }

    /// Check if a version satisfies this range
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set_satisfies(set, version))
    }
}

impl std::str::FromStr for VersionRange {
    type Err = InvalidRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn set_satisfies(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|comparator| comparator.matches(version)) {
        return false;
    }

    if version.pre.is_empty() {
        return true;
    }

    // 1.2.3-beta only satisfies a set that opts into prereleases of 1.2.3
    set.iter().any(|comparator| {
        let bound = &comparator.version;
        !bound.pre.is_empty()
            && bound.major == version.major
            && bound.minor == version.minor
            && bound.patch == version.patch
    })
}

/// Operators that may be separated from their version by whitespace
const OPERATORS: [&str; 8] = ["<", "<=", ">", ">=", "=", "^", "~", "~>"];

/// Parse one `||` alternative into comparators, `None` if it is not valid
fn parse_comparator_set(spec: &str) -> Option<Vec<Comparator>> {
    let tokens: Vec<&str> = spec.split_whitespace().collect();

    // Hyphen range: "1.0.0 - 2.0.0"
    if let [from, "-", to] = tokens.as_slice() {
        return Some(hyphen(
            &PartialVersion::parse(from)?,
            &PartialVersion::parse(to)?,
        ));
    }

    let mut comparators = Vec::new();
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        // ">= 1.2.3" is the same as ">=1.2.3"
        let expanded = if OPERATORS.contains(&token) {
            let operand = iter.next()?;
            expand(&format!("{token}{operand}"))?
        } else {
            expand(token)?
        };
        comparators.extend(expanded);
    }

    Some(comparators)
}

/// Desugar a single range token into primitive comparators
fn expand(token: &str) -> Option<Vec<Comparator>> {
    let comparators = if let Some(rest) = token.strip_prefix("~>") {
        tilde(&PartialVersion::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('~') {
        tilde(&PartialVersion::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('^') {
        caret(&PartialVersion::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix(">=") {
        x_range(Some(Op::Gte), &PartialVersion::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix("<=") {
        x_range(Some(Op::Lte), &PartialVersion::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('>') {
        x_range(Some(Op::Gt), &PartialVersion::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('<') {
        x_range(Some(Op::Lt), &PartialVersion::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('=') {
        x_range(Some(Op::Eq), &PartialVersion::parse(rest)?)
    } else {
        x_range(None, &PartialVersion::parse(token)?)
    };
    Some(comparators)
}

fn version(major: u64, minor: u64, patch: u64, pre: &Prerelease) -> Version {
    Version {
        pre: pre.clone(),
        ..Version::new(major, minor, patch)
    }
}

/// Smallest possible version of `major.minor.patch`, used as an exclusive upper bound
/// so that `<2.0.0-0` also excludes 2.0.0 prereleases
fn lowest(major: u64, minor: u64, patch: u64) -> Version {
    Version {
        pre: Prerelease::new("0").unwrap_or_default(),
        ..Version::new(major, minor, patch)
    }
}

fn between(lower: Version, upper: Version) -> Vec<Comparator> {
    vec![
        Comparator::new(Op::Gte, lower),
        Comparator::new(Op::Lt, upper),
    ]
}

/// ^1.2.3 -> >=1.2.3 <2.0.0-0
/// ^0.2.3 -> >=0.2.3 <0.3.0-0
/// ^0.0.3 -> >=0.0.3 <0.0.4-0
fn caret(partial: &PartialVersion) -> Vec<Comparator> {
    let none = &Prerelease::EMPTY;
    match (partial.major, partial.minor, partial.patch) {
        (None, _, _) => Vec::new(),
        (Some(major), None, _) => between(version(major, 0, 0, none), lowest(major + 1, 0, 0)),
        (Some(0), Some(minor), None) => between(version(0, minor, 0, none), lowest(0, minor + 1, 0)),
        (Some(major), Some(minor), None) => {
            between(version(major, minor, 0, none), lowest(major + 1, 0, 0))
        }
        (Some(major), Some(minor), Some(patch)) => {
            let upper = match (major, minor) {
                (0, 0) => lowest(0, 0, patch + 1),
                (0, _) => lowest(0, minor + 1, 0),
                _ => lowest(major + 1, 0, 0),
            };
            between(version(major, minor, patch, &partial.pre), upper)
        }
    }
}

/// ~1.2.3 -> >=1.2.3 <1.3.0-0
/// ~1.2 -> >=1.2.0 <1.3.0-0
/// ~1 -> >=1.0.0 <2.0.0-0
fn tilde(partial: &PartialVersion) -> Vec<Comparator> {
    let none = &Prerelease::EMPTY;
    match (partial.major, partial.minor, partial.patch) {
        (None, _, _) => Vec::new(),
        (Some(major), None, _) => between(version(major, 0, 0, none), lowest(major + 1, 0, 0)),
        (Some(major), Some(minor), None) => {
            between(version(major, minor, 0, none), lowest(major, minor + 1, 0))
        }
        (Some(major), Some(minor), Some(patch)) => between(
            version(major, minor, patch, &partial.pre),
            lowest(major, minor + 1, 0),
        ),
    }
}

/// Plain and operator-prefixed versions where components may be wildcards
fn x_range(op: Option<Op>, partial: &PartialVersion) -> Vec<Comparator> {
    // "=1.x" is the same as "1.x"
    let op = match op {
        Some(Op::Eq) if partial.is_partial() => None,
        op => op,
    };

    let Some(major) = partial.major else {
        // ">*" and "<*" can never match, every other form matches anything
        return match op {
            Some(Op::Gt | Op::Lt) => vec![Comparator::new(Op::Lt, lowest(0, 0, 0))],
            _ => Vec::new(),
        };
    };

    let (minor, patch) = match (partial.minor, partial.patch) {
        (Some(minor), Some(patch)) => (minor, patch),
        (minor, _) => return x_range_partial(op, major, minor),
    };

    vec![Comparator::new(
        op.unwrap_or(Op::Eq),
        version(major, minor, patch, &partial.pre),
    )]
}

/// `1.x`, `>1.2`, `<=1` and friends, where the patch (and maybe minor) is missing
fn x_range_partial(op: Option<Op>, major: u64, minor: Option<u64>) -> Vec<Comparator> {
    let none = &Prerelease::EMPTY;
    match (op, minor) {
        (None, None) => between(version(major, 0, 0, none), lowest(major + 1, 0, 0)),
        (None, Some(minor)) => between(version(major, minor, 0, none), lowest(major, minor + 1, 0)),
        (Some(Op::Gt), None) => vec![Comparator::new(Op::Gte, version(major + 1, 0, 0, none))],
        (Some(Op::Gt), Some(minor)) => {
            vec![Comparator::new(Op::Gte, version(major, minor + 1, 0, none))]
        }
        (Some(Op::Lte), None) => vec![Comparator::new(Op::Lt, lowest(major + 1, 0, 0))],
        (Some(Op::Lte), Some(minor)) => vec![Comparator::new(Op::Lt, lowest(major, minor + 1, 0))],
        (Some(Op::Lt), minor) => vec![Comparator::new(Op::Lt, lowest(major, minor.unwrap_or(0), 0))],
        (Some(Op::Gte | Op::Eq), minor) => vec![Comparator::new(
            Op::Gte,
            version(major, minor.unwrap_or(0), 0, none),
        )],
    }
}

/// 1.2.3 - 2.3.4 -> >=1.2.3 <=2.3.4
/// 1.2 - 2.3 -> >=1.2.0 <2.4.0-0
fn hyphen(from: &PartialVersion, to: &PartialVersion) -> Vec<Comparator> {
    let none = &Prerelease::EMPTY;
    let mut comparators = Vec::new();

    match (from.major, from.minor, from.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(Comparator::new(Op::Gte, version(major, 0, 0, none))),
        (Some(major), Some(minor), None) => {
            comparators.push(Comparator::new(Op::Gte, version(major, minor, 0, none)))
        }
        (Some(major), Some(minor), Some(patch)) => comparators.push(Comparator::new(
            Op::Gte,
            version(major, minor, patch, &from.pre),
        )),
    }

    match (to.major, to.minor, to.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(Comparator::new(Op::Lt, lowest(major + 1, 0, 0))),
        (Some(major), Some(minor), None) => {
            comparators.push(Comparator::new(Op::Lt, lowest(major, minor + 1, 0)))
        }
        (Some(major), Some(minor), Some(patch)) => comparators.push(Comparator::new(
            Op::Lte,
            version(major, minor, patch, &to.pre),
        )),
    }

    comparators
}
