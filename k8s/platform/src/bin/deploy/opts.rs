use clap::Parser;
use platform::{
    common::constants::{
        DEFAULT_ENVIRONMENT, DEFAULT_NAMESPACE_PREFIX, DEFAULT_VALUES_DIR, HELM_BINARY,
        KUBECTL_BINARY,
    },
    deploy::DeployOptions,
};
use std::path::PathBuf;

/// These are the supported cli configuration options for deploy.
#[derive(Parser, Debug)]
#[command(name = "deploy")]
#[command(
    about = "Deploys the working copy's Helm chart, or its published release, to the current cluster",
    long_about = None
)]
pub(crate) struct CliArgs {
    /// Environment whose values files are layered onto the chart.
    #[arg(short, long, default_value = DEFAULT_ENVIRONMENT)]
    environment: String,

    /// Prefix of the Kubernetes Namespace, which is suffixed with the repository name.
    #[arg(short, long, default_value = DEFAULT_NAMESPACE_PREFIX)]
    namespace_prefix: String,

    /// Chart version to install. Defaults to the latest.
    #[arg(short = 'v', long)]
    version: Option<String>,

    /// Deploy the chart from the published Helm repository rather than the working copy.
    #[arg(short, long, default_value_t = false)]
    production: bool,

    /// Render the manifests without applying them.
    #[arg(short, long, default_value_t = false)]
    template: bool,

    /// Allow prerelease chart versions.
    #[arg(short, long, default_value_t = false)]
    development: bool,

    /// Directory containing values-<env>.yaml and values-<repository>-<env>.yaml.
    #[arg(long, env = "DEPLOY_VALUES_DIR", default_value = DEFAULT_VALUES_DIR, value_name = "DIR_PATH")]
    values_dir: PathBuf,

    /// The helm binary.
    #[arg(long, env = "HELM_BIN", default_value = HELM_BINARY)]
    helm: String,

    /// The kubectl binary.
    #[arg(long, env = "KUBECTL_BIN", default_value = KUBECTL_BINARY)]
    kubectl: String,
}

impl From<CliArgs> for DeployOptions {
    fn from(args: CliArgs) -> Self {
        Self {
            environment: args.environment,
            namespace_prefix: args.namespace_prefix,
            version: args.version,
            production: args.production,
            template: args.template,
            development: args.development,
            values_dir: args.values_dir,
            helm: args.helm,
            kubectl: args.kubectl,
        }
    }
}
