use crate::{
    chart::Chart,
    command::{exit_code, ExternalCommand},
    common::{
        constants::{
            chart_repository_alias, chart_repository_url, environment_values_file,
            repository_values_file, CHARTS_DIR, CRDS_DIR, DEFAULT_ENVIRONMENT,
            DEFAULT_NAMESPACE_PREFIX, DEFAULT_VALUES_DIR, HELM_BINARY, KUBECTL_BINARY,
        },
        error::Result,
    },
    repository::RepositoryIdentity,
    vec_to_strings,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything a deployment is derived from, besides the working copy itself.
#[derive(Clone, Debug)]
pub struct DeployOptions {
    /// Environment whose values files are layered onto the chart.
    pub environment: String,
    /// Prefixed to the repository name to form the Kubernetes Namespace.
    pub namespace_prefix: String,
    /// Chart version to pin. When unset helm picks the latest.
    pub version: Option<String>,
    /// Deploy the published chart instead of the working copy's.
    pub production: bool,
    /// Render the manifests instead of applying them.
    pub template: bool,
    /// Allow prerelease chart versions.
    pub development: bool,
    /// Directory containing the values files. Relative paths are relative to the working copy.
    pub values_dir: PathBuf,
    /// helm binary.
    pub helm: String,
    /// kubectl binary.
    pub kubectl: String,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            version: None,
            production: false,
            template: false,
            development: false,
            values_dir: PathBuf::from(DEFAULT_VALUES_DIR),
            helm: HELM_BINARY.to_string(),
            kubectl: KUBECTL_BINARY.to_string(),
        }
    }
}

/// The values derived from a working copy, and the ordered commands which deploy it.
#[derive(Clone, Debug)]
pub struct DeployPlan {
    identity: RepositoryIdentity,
    namespace: String,
    chart_dir: PathBuf,
    chart_name: String,
    repository_url: String,
    commands: Vec<ExternalCommand>,
}

impl DeployPlan {
    /// Derives the deployment of the working copy at `workdir`. Nothing is executed. Missing
    /// manifests leave the derived names empty, and the external tools report the outcome.
    pub fn resolve<P>(options: &DeployOptions, workdir: P) -> Self
    where
        P: AsRef<Path>,
    {
        let workdir = workdir.as_ref();

        let identity = RepositoryIdentity::discover(workdir);
        let repository = identity.name();

        let repository_url = chart_repository_url(repository);
        let repository_alias = chart_repository_alias(repository);
        let chart_dir = workdir.join(CHARTS_DIR).join(repository);
        let chart_name = match Chart::from_dir(chart_dir.as_path()) {
            Ok(chart) => chart.name().to_string(),
            Err(error) => {
                warn!(%error, "Chart name unavailable");
                String::new()
            }
        };
        let namespace = format!("{}-{}", options.namespace_prefix, repository);

        info!(
            organization = identity.organization(),
            repository,
            %namespace,
            chart = %chart_name,
            %repository_url,
            "Resolved deployment"
        );

        let mut extra_args: Vec<String> = Vec::new();

        let values_dir = workdir.join(options.values_dir.as_path());
        for values_file in [
            values_dir.join(environment_values_file(options.environment.as_str())),
            values_dir.join(repository_values_file(
                repository,
                options.environment.as_str(),
            )),
        ] {
            if values_file.is_file() {
                extra_args.extend(vec_to_strings!["-f", values_file.to_string_lossy()]);
            } else {
                debug!(path = %values_file.display(), "No values file");
            }
        }

        if options.development {
            extra_args.push("--devel".to_string());
        }

        if let Some(version) = &options.version {
            extra_args.extend(vec_to_strings!["--version", version]);
        }

        let mut commands = Vec::new();

        let crds_dir = chart_dir.join(CRDS_DIR);
        if !options.template && crds_dir.is_dir() {
            commands.push(
                ExternalCommand::new(options.kubectl.as_str())
                    .with_args(vec_to_strings!["apply", "-f", crds_dir.to_string_lossy()]),
            );
        }

        let chart_ref = if options.production {
            commands.push(ExternalCommand::new(options.helm.as_str()).with_args(vec_to_strings![
                "repo",
                "add",
                "--force-update",
                repository_alias,
                repository_url
            ]));
            format!("{repository_alias}/{chart_name}")
        } else {
            chart_dir.to_string_lossy().into_owned()
        };

        let subcommand: Vec<String> = if options.template {
            vec_to_strings![
                "template",
                "--namespace",
                namespace,
                "--no-hooks",
                "--skip-tests"
            ]
        } else {
            vec_to_strings![
                "upgrade",
                "--install",
                "--create-namespace",
                "--namespace",
                namespace
            ]
        };

        commands.push(
            ExternalCommand::new(options.helm.as_str())
                .with_args(subcommand)
                .with_args([chart_name.as_str(), chart_ref.as_str()])
                .with_args(extra_args),
        );

        Self {
            identity,
            namespace,
            chart_dir,
            chart_name,
            repository_url,
            commands,
        }
    }

    /// Runs the commands in order, stopping at the first which fails. Returns the exit code of
    /// the last command run.
    pub fn execute(&self) -> Result<i32> {
        let mut code = 0;
        for command in &self.commands {
            let status = command.status()?;
            code = exit_code(status);
            if !status.success() {
                debug!(%command, code, "Command failed");
                break;
            }
        }

        Ok(code)
    }

    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// The Kubernetes Namespace deployed into.
    pub fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    /// The working copy's chart directory.
    pub fn chart_dir(&self) -> &Path {
        self.chart_dir.as_path()
    }

    pub fn chart_name(&self) -> &str {
        self.chart_name.as_str()
    }

    /// The published Helm chart repository.
    pub fn repository_url(&self) -> &str {
        self.repository_url.as_str()
    }

    /// The commands, in execution order.
    pub fn commands(&self) -> &[ExternalCommand] {
        self.commands.as_slice()
    }
}
