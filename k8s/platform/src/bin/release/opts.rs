use clap::{builder::PossibleValuesParser, Parser};
use platform::release::{parse_version, COMPONENTS};
use semver::Version;
use std::path::PathBuf;

/// Parses the release version, which may be written as a tag.
fn version_parser(version: &str) -> Result<Version, String> {
    parse_version(version).map_err(|error| error.to_string())
}

/// These are the supported cli configuration options for release.
#[derive(Parser, Debug)]
#[command(name = "release")]
#[command(
    about = "Releases every platform component, in dependency order, from a local workspace",
    long_about = None
)]
pub(crate) struct CliArgs {
    /// The version to release, e.g. v1.2.0 or 1.2.0-rc.1.
    #[arg(long, value_parser = version_parser)]
    version: Version,

    /// Resume the release from this component.
    #[arg(long, value_parser = PossibleValuesParser::new(COMPONENTS.iter().map(|c| c.name())))]
    from_step: Option<String>,

    /// Directory containing a checkout of each component.
    #[arg(long, env = "RELEASE_WORKSPACE", default_value = ".", value_name = "DIR_PATH")]
    workspace: PathBuf,
}

impl CliArgs {
    /// This returns the version being released.
    pub(crate) fn version(&self) -> &Version {
        &self.version
    }

    /// This returns the component to start from, if any.
    pub(crate) fn from_step(&self) -> Option<&str> {
        self.from_step.as_deref()
    }

    /// This returns the directory holding the component checkouts.
    pub(crate) fn workspace(&self) -> &PathBuf {
        &self.workspace
    }
}
