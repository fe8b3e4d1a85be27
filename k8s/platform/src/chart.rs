use crate::common::{
    constants::{CHARTS_DIR, CHART_DESCRIPTOR},
    error::{ReadingDirectoryContents, ReadingFile, RegexCompile, Result, YamlParseFromFile},
};
use regex::Regex;
use serde::Deserialize;
use snafu::ResultExt;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
/// Chart for name and version.
pub struct Chart {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    app_version: Option<String>,
}

impl Chart {
    /// Reads the Chart.yaml within a chart directory.
    pub fn from_dir<P>(chart_dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let filepath = chart_dir.as_ref().join(CHART_DESCRIPTOR);
        let buf = fs::read(filepath.as_path()).context(ReadingFile {
            filepath: filepath.clone(),
        })?;

        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile { filepath })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }
}

/// Lists the `charts/*/Chart.yaml` files of a repository checkout. A missing charts directory
/// has none.
pub fn find_chart_descriptors<P>(repository_dir: P) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let charts_dir = repository_dir.as_ref().join(CHARTS_DIR);
    let entries = match fs::read_dir(charts_dir.as_path()) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => {
            return Err(error).context(ReadingDirectoryContents { path: charts_dir });
        }
    };

    let mut descriptors = Vec::new();
    for entry in entries {
        let entry = entry.context(ReadingDirectoryContents {
            path: charts_dir.clone(),
        })?;
        let descriptor = entry.path().join(CHART_DESCRIPTOR);
        if descriptor.is_file() {
            descriptors.push(descriptor);
        }
    }
    descriptors.sort();

    Ok(descriptors)
}

/// Replaces the value of every top-level `version:` and `appVersion:` line with the given
/// version. All other lines are kept as they are.
pub fn set_chart_versions(contents: &str, version: &str) -> Result<String> {
    let expression = r"^(version|appVersion):";
    let regex = Regex::new(expression).context(RegexCompile {
        expression: expression.to_string(),
    })?;

    Ok(contents
        .split_inclusive('\n')
        .map(|line| match regex.captures(line) {
            Some(captures) => format!("{}: {version}\n", &captures[1]),
            None => line.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = "apiVersion: v2\nname: widget\ndescription: A widget\n\nversion: v0.1.0\nappVersion: v0.1.0\n\nicon: https://example.com/icon.png\n";

    #[test]
    fn reads_chart_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Chart.yaml"), CHART).unwrap();

        let chart = Chart::from_dir(dir.path()).unwrap();
        assert_eq!(chart.name(), "widget");
        assert_eq!(chart.version(), "v0.1.0");
        assert_eq!(chart.app_version(), Some("v0.1.0"));
    }

    #[test]
    fn missing_descriptor_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Chart::from_dir(dir.path()).is_err());
    }

    #[test]
    fn rewrites_only_version_keys() {
        let updated = set_chart_versions(CHART, "v1.2.3-rc.1").unwrap();
        assert_eq!(
            updated,
            "apiVersion: v2\nname: widget\ndescription: A widget\n\nversion: v1.2.3-rc.1\nappVersion: v1.2.3-rc.1\n\nicon: https://example.com/icon.png\n"
        );
    }

    #[test]
    fn leaves_nested_versions_alone() {
        let contents = "dependencies:\n  - name: common\n    version: 1.0.0\nversion: 0.0.1";
        let updated = set_chart_versions(contents, "v2.0.0").unwrap();
        assert_eq!(
            updated,
            "dependencies:\n  - name: common\n    version: 1.0.0\nversion: v2.0.0\n"
        );
    }

    #[test]
    fn finds_chart_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_chart_descriptors(dir.path()).unwrap().is_empty());

        let chart_dir = dir.path().join("charts").join("widget");
        fs::create_dir_all(chart_dir.as_path()).unwrap();
        fs::create_dir_all(dir.path().join("charts").join("empty")).unwrap();
        fs::write(chart_dir.join("Chart.yaml"), CHART).unwrap();

        assert_eq!(
            find_chart_descriptors(dir.path()).unwrap(),
            vec![chart_dir.join("Chart.yaml")]
        );
    }
}
