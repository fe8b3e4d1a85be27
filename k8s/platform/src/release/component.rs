use crate::{
    chart::{find_chart_descriptors, set_chart_versions},
    common::{
        constants::{MAIN_BRANCH, RELEASE_BRANCH, SOURCE_ORGANIZATION},
        error::{
            ChartDescriptorCount, NotOnReleaseBranch, OpenApiSpecCount, ReadingFile, Result,
            UnknownComponent, WritingFile,
        },
    },
    release::{
        canonical_version,
        openapi::{find_openapi_specs, set_openapi_version},
        toolchain::Toolchain,
    },
    user_prompt::{wait_for_confirmation, MERGE_PULL_REQUEST},
};
use semver::Version;
use snafu::{ensure, OptionExt, ResultExt};
use std::{
    fs,
    io::BufRead,
    path::{Path, PathBuf},
};
use tracing::info;

/// Runs after the OpenAPI schema is updated for a full release, from within the component's
/// checkout.
pub type PrecommitHook = fn(&Toolchain, &Path) -> Result<()>;

/// A single component of the platform, released from its own repository.
pub struct Component {
    name: &'static str,
    dependencies: &'static [&'static str],
    precommit_hook: Option<PrecommitHook>,
}

/// All components, in release order. A component's dependencies precede it.
pub static COMPONENTS: [Component; 6] = [
    Component::new("core", &[]),
    Component::new("identity", &["core"]),
    Component::new("region", &["core", "identity"]),
    Component::new("compute", &["core", "identity", "region"]),
    Component::new("kubernetes", &["core", "identity", "region"]),
    Component::new("ui", &[]).with_precommit_hook(ui_npm_update),
];

/// Returns all components from the given step onwards, or every component without one.
pub fn components_from(step: Option<&str>) -> Result<&'static [Component]> {
    let Some(step) = step else {
        return Ok(&COMPONENTS);
    };

    let index = COMPONENTS
        .iter()
        .position(|component| component.name == step)
        .context(UnknownComponent { name: step })?;

    Ok(&COMPONENTS[index..])
}

/// Regenerates the UI's API clients from the freshly released OpenAPI schemas.
fn ui_npm_update(tools: &Toolchain, dir: &Path) -> Result<()> {
    for client in ["identity", "region", "compute", "kubernetes"] {
        tools
            .npm
            .clone()
            .with_args(["run", format!("openapi:{client}").as_str()])
            .in_dir(dir)
            .check()?;
    }
    Ok(())
}

impl Component {
    const fn new(name: &'static str, dependencies: &'static [&'static str]) -> Self {
        Self {
            name,
            dependencies,
            precommit_hook: None,
        }
    }

    const fn with_precommit_hook(self, hook: PrecommitHook) -> Self {
        Self {
            precommit_hook: Some(hook),
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Components whose Go modules this one imports.
    pub fn dependencies(&self) -> &'static [&'static str] {
        self.dependencies
    }

    /// The component's checkout within the workspace.
    pub fn dir<P>(&self, workspace: P) -> PathBuf
    where
        P: AsRef<Path>,
    {
        workspace.as_ref().join(self.name)
    }

    /// Validates that the checkout is on the main branch.
    pub fn validate<P>(&self, workspace: P, tools: &Toolchain) -> Result<()>
    where
        P: AsRef<Path>,
    {
        console_logger::banner("Validating", self.name);

        let branch = tools
            .git
            .clone()
            .in_dir(self.dir(workspace))
            .with_args(["branch", "--show-current"])
            .stdout()?;
        let branch = branch.trim();

        ensure!(
            branch == MAIN_BRANCH,
            NotOnReleaseBranch {
                component: self.name,
                branch,
                expected: MAIN_BRANCH,
            }
        );

        Ok(())
    }

    /// Sets the version of the component's only Helm chart.
    pub fn update_chart<P>(&self, dir: P, version: &Version) -> Result<PathBuf>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        let descriptors = find_chart_descriptors(dir)?;
        ensure!(
            descriptors.len() == 1,
            ChartDescriptorCount {
                component: self.name,
                path: dir,
                count: descriptors.len(),
            }
        );

        let path = descriptors[0].clone();
        rewrite(path.as_path(), |contents| {
            set_chart_versions(contents, canonical_version(version).as_str())
        })?;

        Ok(path)
    }

    /// Sets the version of the component's OpenAPI schema, if it has one. Returns whether it
    /// did.
    pub fn update_openapi<P>(&self, dir: P, version: &Version) -> Result<bool>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        let specs = find_openapi_specs(dir)?;
        ensure!(
            specs.len() <= 1,
            OpenApiSpecCount {
                component: self.name,
                path: dir,
                count: specs.len(),
            }
        );

        let Some(path) = specs.first() else {
            return Ok(false);
        };
        rewrite(path.as_path(), |contents| {
            set_openapi_version(contents, version.to_string().as_str())
        })?;

        Ok(true)
    }

    /// Performs a full or release candidate release of the component. The version bump goes
    /// through a pull request which the operator merges before the tag is pushed.
    pub fn release<P, R>(
        &self,
        workspace: P,
        version: &Version,
        tools: &Toolchain,
        confirm: R,
    ) -> Result<()>
    where
        P: AsRef<Path>,
        R: BufRead,
    {
        console_logger::banner("Releasing", self.name);

        let dir = self.dir(workspace);
        let tag = canonical_version(version);

        console_logger::stage("Updating Helm");
        let chart = self.update_chart(dir.as_path(), version)?;
        info!(component = self.name, chart = %chart.display(), %tag, "Updated chart version");

        if !self.dependencies.is_empty() {
            console_logger::stage("Updating Go Dependencies");
            for dependency in self.dependencies {
                tools
                    .go
                    .clone()
                    .with_args([
                        "get".to_string(),
                        format!("github.com/{SOURCE_ORGANIZATION}/{dependency}@{tag}"),
                    ])
                    .in_dir(dir.as_path())
                    .check()?;
            }

            tools
                .go
                .clone()
                .with_args(["mod", "tidy"])
                .in_dir(dir.as_path())
                .check()?;
        }

        if version.pre.is_empty() {
            console_logger::stage("Updating OpenAPI");
            if self.update_openapi(dir.as_path(), version)? {
                tools
                    .make
                    .clone()
                    .with_args(["validate"])
                    .in_dir(dir.as_path())
                    .check()?;
            }

            if let Some(hook) = self.precommit_hook {
                console_logger::stage("Calling Precommit Hook");
                hook(tools, dir.as_path())?;
            }
        }

        let title = format!("Version {tag}");

        console_logger::stage("Committing Update");
        for args in [
            vec!["checkout", "-b", RELEASE_BRANCH],
            vec!["add", "."],
            vec!["commit", "-m", title.as_str()],
            vec!["push", "-f", "origin", RELEASE_BRANCH],
        ] {
            tools.git.clone().with_args(args).in_dir(dir.as_path()).check()?;
        }
        tools
            .gh
            .clone()
            .with_args([
                "pr",
                "create",
                "--head",
                RELEASE_BRANCH,
                "--title",
                title.as_str(),
                "--body",
                "",
            ])
            .in_dir(dir.as_path())
            .check()?;

        console_logger::stage("Merge");
        wait_for_confirmation(MERGE_PULL_REQUEST, confirm)?;

        console_logger::stage("Release");
        for args in [
            vec!["checkout", MAIN_BRANCH],
            vec!["pull"],
            vec!["tag", tag.as_str()],
            vec!["push", "origin", tag.as_str()],
            vec!["branch", "-D", RELEASE_BRANCH],
        ] {
            tools.git.clone().with_args(args).in_dir(dir.as_path()).check()?;
        }

        info!(component = self.name, %tag, "Released");

        Ok(())
    }
}

/// Rewrites a file's contents in place.
fn rewrite<F>(path: &Path, update: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<String>,
{
    let contents = fs::read_to_string(path).context(ReadingFile {
        filepath: path.to_path_buf(),
    })?;
    let contents = update(contents.as_str())?;
    fs::write(path, contents).context(WritingFile {
        filepath: path.to_path_buf(),
    })
}
