use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[snafu(context(suffix(false)))]
pub enum Error {
    /// Error for when an external command could not be started.
    #[snafu(display(
        "Failed to run command,\ncommand: {},\nargs: {:?},\ncommand_error: {}",
        command,
        args,
        source
    ))]
    CommandSpawn {
        source: std::io::Error,
        command: String,
        args: Vec<String>,
    },

    /// Error for when an external command exits unsuccessfully.
    #[snafu(display(
        "Command exited unsuccessfully,\ncommand: {},\nargs: {:?},\nstatus: {}",
        command,
        args,
        status
    ))]
    CommandFailed {
        command: String,
        args: Vec<String>,
        status: String,
    },

    /// Error for when a command's output isn't valid UTF-8.
    #[snafu(display("Failed to convert &[u8] to string: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when the current working directory can't be determined.
    #[snafu(display("Failed to determine the current working directory: {}", source))]
    CurrentDir { source: std::io::Error },

    /// Error for when a file could not be read.
    #[snafu(display("Failed to read from {}: {}", filepath.display(), source))]
    ReadingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when a file could not be written to.
    #[snafu(display("Failed to write to {}: {}", filepath.display(), source))]
    WritingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when the contents of a directory could not be listed.
    #[snafu(display("Failed to read contents of directory {}: {}", path.display(), source))]
    ReadingDirectoryContents {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when YAML could not be parsed from a file.
    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    /// Error for when JSON could not be parsed from a file.
    #[snafu(display("Failed to parse JSON at {}: {}", filepath.display(), source))]
    JsonParseFromFile {
        source: serde_json::Error,
        filepath: PathBuf,
    },

    /// Error for when regular expression parsing or compilation fails.
    #[snafu(display("Failed to compile regex {}: {}", expression, source))]
    RegexCompile {
        source: regex::Error,
        expression: String,
    },

    /// Error for when a version string isn't valid semver.
    #[snafu(display("Failed to parse {} as a semantic version: {}", version, source))]
    SemverParse {
        source: semver::Error,
        version: String,
    },

    /// Error for when a release step names a component which doesn't exist.
    #[snafu(display("Unknown component '{}'", name))]
    UnknownComponent { name: String },

    /// Error for when a component's checkout isn't on the release branch.
    #[snafu(display(
        "Component {} is checked out to '{}', expected '{}'",
        component,
        branch,
        expected
    ))]
    NotOnReleaseBranch {
        component: String,
        branch: String,
        expected: String,
    },

    /// Error for when a component doesn't have exactly one Helm chart.
    #[snafu(display(
        "Expected exactly 1 Chart.yaml for component {} under {}, found {}",
        component,
        path.display(),
        count
    ))]
    ChartDescriptorCount {
        component: String,
        path: PathBuf,
        count: usize,
    },

    /// Error for when a component has more than one OpenAPI schema.
    #[snafu(display(
        "Expected 0 or 1 OpenAPI spec.yaml for component {} under {}, found {}",
        component,
        path.display(),
        count
    ))]
    OpenApiSpecCount {
        component: String,
        path: PathBuf,
        count: usize,
    },

    /// Error for when the operator's input could not be read.
    #[snafu(display("Failed to read from standard input: {}", source))]
    ReadingStdin { source: std::io::Error },

    /// Error for when a prompt could not be written to the operator.
    #[snafu(display("Failed to write to standard output: {}", source))]
    WritingStdout { source: std::io::Error },

    /// Error for when standard input closes before the operator confirms a prompt.
    #[snafu(display("Standard input closed before confirming: {}", prompt))]
    PromptAborted { prompt: String },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub type Result<T, E = Error> = std::result::Result<T, E>;
