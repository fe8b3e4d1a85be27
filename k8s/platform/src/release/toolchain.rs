use crate::command::ExternalCommand;

/// The binaries a release drives. Each is a command prefix which the release appends its
/// arguments to.
#[derive(Clone, Debug)]
pub struct Toolchain {
    pub git: ExternalCommand,
    pub gh: ExternalCommand,
    pub go: ExternalCommand,
    pub make: ExternalCommand,
    pub npm: ExternalCommand,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            git: ExternalCommand::new("git"),
            gh: ExternalCommand::new("gh"),
            go: ExternalCommand::new("go"),
            make: ExternalCommand::new("make"),
            npm: ExternalCommand::new("npm"),
        }
    }
}
