use crate::common::{
    constants::{OPENAPI_DIR, OPENAPI_SPEC_SUFFIX},
    error::{ReadingDirectoryContents, RegexCompile, Result},
};
use regex::Regex;
use snafu::ResultExt;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Lists the `pkg/openapi/*.spec.yaml` files of a repository checkout.
pub fn find_openapi_specs<P>(repository_dir: P) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let dir = repository_dir.as_ref().join(OPENAPI_DIR);
    let entries = match fs::read_dir(dir.as_path()) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(error).context(ReadingDirectoryContents { path: dir }),
    };

    let mut specs = Vec::new();
    for entry in entries {
        let path = entry
            .context(ReadingDirectoryContents { path: dir.clone() })?
            .path();
        let is_spec = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(OPENAPI_SPEC_SUFFIX));
        if is_spec && path.is_file() {
            specs.push(path);
        }
    }
    specs.sort();

    Ok(specs)
}

/// Replaces the `info.version` of an OpenAPI schema. Only indented `version: X.Y.Z` lines are
/// touched, so component schemas with other version fields are kept.
pub fn set_openapi_version(contents: &str, version: &str) -> Result<String> {
    let expression = r"^(\s+version):\s+\d+(\.\d+){2}";
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

    #[test]
    fn rewrites_info_version() {
        let spec = "openapi: 3.0.3\ninfo:\n  title: Identity API\n  version: 0.2.0\npaths: {}\n";
        assert_eq!(
            set_openapi_version(spec, "1.4.0").unwrap(),
            "openapi: 3.0.3\ninfo:\n  title: Identity API\n  version: 1.4.0\npaths: {}\n"
        );
    }

    #[test]
    fn ignores_non_semver_versions() {
        let spec = "info:\n  version: latest\nversion: 1.0.0\n";
        assert_eq!(set_openapi_version(spec, "2.0.0").unwrap(), spec);
    }

    #[test]
    fn finds_specs_only() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_openapi_specs(dir.path()).unwrap().is_empty());

        let openapi = dir.path().join("pkg/openapi");
        fs::create_dir_all(openapi.as_path()).unwrap();
        fs::write(openapi.join("server.spec.yaml"), "info: {}\n").unwrap();
        fs::write(openapi.join("types.go"), "package openapi\n").unwrap();

        assert_eq!(
            find_openapi_specs(dir.path()).unwrap(),
            vec![openapi.join("server.spec.yaml")]
        );
    }
}
