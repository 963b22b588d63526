use semver::{BuildMetadata, Prerelease, Version};

/// Parse an exact version string into a semver::Version.
///
/// Surrounding whitespace and a leading `v` are accepted. Build metadata is
/// validated and then dropped, it never takes part in comparisons.
///
/// Examples:
/// - "1.2.3" -> Version(1, 2, 3)
/// - "v1.2.3-beta.1" -> Version(1, 2, 3, pre: beta.1)
/// - "1.2" -> None
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    let mut parsed = Version::parse(version).ok()?;
    parsed.build = BuildMetadata::EMPTY;
    Some(parsed)
}

/// A version where trailing components may be missing or wildcards (`x`, `X`, `*`).
///
/// Once a component is a wildcard every following component is one too, so
/// `1.x.3` reads as `1.x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Prerelease,
}

impl PartialVersion {
    /// Parse a range operand such as `1`, `1.2`, `1.2.x`, `*` or `1.2.3-rc.1`.
    ///
    /// Leading `v` and `=` are ignored. A prerelease is only allowed after a
    /// patch component.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().trim_start_matches(['v', '=']);

        let input = match input.split_once('+') {
            Some((rest, build)) => {
                BuildMetadata::new(build).ok()?;
                rest
            }
            None => input,
        };

        let (core, pre) = match input.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (input, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return None;
        }

        let mut components = [None; 3];
        let mut wildcard = false;
        for (slot, part) in components.iter_mut().zip(&parts) {
            if is_wildcard(part) {
                wildcard = true;
                continue;
            }
            let number = parse_component(part)?;
            if !wildcard {
                *slot = Some(number);
            }
        }

        let [major, minor, patch] = components;
        let pre = match pre {
            Some(pre) if parts.len() == 3 && !pre.is_empty() => {
                let pre = Prerelease::new(pre).ok()?;
                if patch.is_some() { pre } else { Prerelease::EMPTY }
            }
            Some(_) => return None,
            None => Prerelease::EMPTY,
        };

        Some(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Whether any component is missing or a wildcard
    pub fn is_partial(&self) -> bool {
        self.patch.is_none()
    }
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Largest version component accepted in a range, same as npm's `Number.MAX_SAFE_INTEGER`.
/// Range bounds add one to a component, which must not overflow.
pub const MAX_COMPONENT: u64 = 9_007_199_254_740_991;

/// Numeric component without sign or leading zeros
fn parse_component(part: &str) -> Option<u64> {
    let valid = !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));
    if !valid {
        return None;
    }
    part.parse().ok().filter(|number| *number <= MAX_COMPONENT)
}
