/// This is the GitHub organization which publishes the Helm chart repositories.
pub const CHART_REPOSITORY_ORGANIZATION: &str = "nscaledev";

/// Every published Helm chart repository name carries this prefix.
pub const CHART_REPOSITORY_PREFIX: &str = "uni-";

/// This is the environment used when none is specified.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// This is the Kubernetes Namespace prefix used when none is specified.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "unikorn";

/// Directory containing per-environment values files, relative to the working copy.
pub const DEFAULT_VALUES_DIR: &str = "..";

/// Default helm binary, looked up in $PATH.
pub const HELM_BINARY: &str = "helm";

/// Default kubectl binary, looked up in $PATH.
pub const KUBECTL_BINARY: &str = "kubectl";

/// Go module manifest.
pub const GO_MODULE_MANIFEST: &str = "go.mod";

/// Node package manifest.
pub const NODE_PACKAGE_MANIFEST: &str = "package.json";

/// Directory containing a repository's Helm charts.
pub const CHARTS_DIR: &str = "charts";

/// Helm chart descriptor file.
pub const CHART_DESCRIPTOR: &str = "Chart.yaml";

/// Directory within a Helm chart holding CustomResourceDefinitions. Helm only installs these
/// on first install, so they're applied separately.
pub const CRDS_DIR: &str = "crds";

/// Directory within a component repository holding the OpenAPI schema.
pub const OPENAPI_DIR: &str = "pkg/openapi";

/// Filename suffix of an OpenAPI schema.
pub const OPENAPI_SPEC_SUFFIX: &str = ".spec.yaml";

/// GitHub organization hosting the component source repositories.
pub const SOURCE_ORGANIZATION: &str = "unikorn-cloud";

/// Branch which component repositories are released from.
pub const MAIN_BRANCH: &str = "main";

/// Branch carrying the version bump pull request.
pub const RELEASE_BRANCH: &str = "bump";

/// This is the URL of the published Helm chart repository for a source repository.
pub fn chart_repository_url(repository_name: &str) -> String {
    format!("https://{CHART_REPOSITORY_ORGANIZATION}.github.io/{CHART_REPOSITORY_PREFIX}{repository_name}")
}

/// This is the local helm alias of the published Helm chart repository.
pub fn chart_repository_alias(repository_name: &str) -> String {
    format!("{CHART_REPOSITORY_PREFIX}{repository_name}")
}

/// Global values file for an environment.
pub fn environment_values_file(environment: &str) -> String {
    format!("values-{environment}.yaml")
}

/// Repository specific values file for an environment.
pub fn repository_values_file(repository_name: &str, environment: &str) -> String {
    format!("values-{repository_name}-{environment}.yaml")
}
