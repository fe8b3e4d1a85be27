use crate::common::{
    constants::{GO_MODULE_MANIFEST, NODE_PACKAGE_MANIFEST},
    error::{JsonParseFromFile, ReadingFile, Result},
};
use serde::Deserialize;
use snafu::ResultExt;
use std::{fs, io, path::Path};
use tracing::{debug, warn};

/// The organization and repository name a working copy belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepositoryIdentity {
    organization: String,
    name: String,
}

/// The fields of a `package.json` which identify the package.
#[derive(Deserialize)]
struct NodePackage {
    #[serde(default)]
    name: String,
}

impl RepositoryIdentity {
    /// Splits an identifier such as `github.com/unikorn-cloud/identity` or `@unikorn-cloud/ui`
    /// into its organization and repository name.
    pub fn from_identifier(identifier: &str) -> Self {
        let mut elements: Vec<&str> = identifier
            .trim()
            .split('/')
            .filter(|element| !element.is_empty())
            .collect();

        // Go modules at major version 2+ carry a /vN suffix.
        if elements.len() > 1 && is_major_version_suffix(elements[elements.len() - 1]) {
            elements.pop();
        }

        let name = elements.pop().unwrap_or_default().to_string();
        let organization = elements
            .pop()
            .map(|org| org.trim_start_matches('@').to_string())
            .unwrap_or_default();

        Self { organization, name }
    }

    /// Inspects the manifests in the directory, preferring a Go module over a Node package.
    /// When neither yields an identifier the identity is empty.
    pub fn discover<P>(dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();

        let identifier = match go_module_path(dir.join(GO_MODULE_MANIFEST)) {
            Ok(Some(module)) => Some(module),
            Ok(None) => match node_package_name(dir.join(NODE_PACKAGE_MANIFEST)) {
                Ok(name) => name,
                Err(error) => {
                    warn!(%error, "Ignoring unreadable package manifest");
                    None
                }
            },
            Err(error) => {
                warn!(%error, "Ignoring unreadable module manifest");
                None
            }
        };

        match identifier {
            Some(identifier) => {
                let identity = Self::from_identifier(identifier.as_str());
                debug!(%identifier, ?identity, "Discovered repository identity");
                identity
            }
            None => {
                warn!(dir = %dir.display(), "No repository manifest found");
                Self::default()
            }
        }
    }

    /// The organization, e.g. `unikorn-cloud`. May be empty.
    pub fn organization(&self) -> &str {
        self.organization.as_str()
    }

    /// The repository name, e.g. `identity`. May be empty.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

fn is_major_version_suffix(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Reads the file, mapping a missing file to None.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error).context(ReadingFile {
            filepath: path.to_path_buf(),
        }),
    }
}

/// Extracts the path of the `module` directive from a go.mod file.
fn go_module_path<P>(path: P) -> Result<Option<String>>
where
    P: AsRef<Path>,
{
    let Some(contents) = read_optional(path.as_ref())? else {
        return Ok(None);
    };

    Ok(contents.lines().find_map(|line| {
        let module = line.trim().strip_prefix("module")?;
        // Guards against directives which merely start with "module".
        if !module.starts_with(char::is_whitespace) {
            return None;
        }
        let module = module.split("//").next()?.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    }))
}

/// Extracts the package name from a package.json file.
fn node_package_name<P>(path: P) -> Result<Option<String>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let Some(contents) = read_optional(path)? else {
        return Ok(None);
    };

    let package: NodePackage = serde_json::from_str(contents.as_str()).context(JsonParseFromFile {
        filepath: path.to_path_buf(),
    })?;

    Ok((!package.name.is_empty()).then_some(package.name))
}
