use crate::common::error::{Result, SemverParse};
use semver::Version;
use snafu::ResultExt;

/// The platform's component repositories and how each is released.
pub mod component;
/// OpenAPI schema version handling.
pub mod openapi;
/// The external binaries a release runs.
pub mod toolchain;

pub use component::{components_from, Component, COMPONENTS};
pub use toolchain::Toolchain;

/// Parses a semantic version, tolerating a leading 'v' as used by tags.
pub fn parse_version(version: &str) -> Result<Version> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    Version::parse(trimmed).context(SemverParse {
        version: version.to_string(),
    })
}

/// Returns the canonical version, used by tags, from a semantic version.
pub fn canonical_version(version: &Version) -> String {
    if version.pre.is_empty() {
        format!("v{}.{}.{}", version.major, version.minor, version.patch)
    } else {
        format!(
            "v{}.{}.{}-{}",
            version.major, version.minor, version.patch, version.pre
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!(parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert!(parse_version("v1.2").is_err());
        assert!(parse_version("vv1.2.3").is_err());
    }

    #[test]
    fn canonical_version_carries_prerelease() {
        assert_eq!(canonical_version(&parse_version("1.2.3").unwrap()), "v1.2.3");
        assert_eq!(
            canonical_version(&parse_version("v0.3.0-rc.4").unwrap()),
            "v0.3.0-rc.4"
        );
        assert_eq!(
            canonical_version(&parse_version("1.0.0+build.5").unwrap()),
            "v1.0.0"
        );
    }
}
