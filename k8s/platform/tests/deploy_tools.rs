#![cfg(unix)]

use assert_cmd::Command;
use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// A workspace holding the "widget" repository and stub helm and kubectl binaries which record
/// each invocation to a shared log.
struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let chart_dir = root.path().join("widget/charts/widget");
        fs::create_dir_all(chart_dir.join("crds")).unwrap();
        fs::write(
            root.path().join("widget/go.mod"),
            "module github.com/unikorn-cloud/widget\n\ngo 1.22\n",
        )
        .unwrap();
        fs::write(
            chart_dir.join("Chart.yaml"),
            "apiVersion: v2\nname: widget\nversion: v0.1.0\n",
        )
        .unwrap();
        fs::write(root.path().join("values-staging.yaml"), "{}\n").unwrap();

        let workspace = Self { root };
        workspace.stub("helm", "${HELM_EXIT:-0}");
        workspace.stub("kubectl", "0");
        workspace
    }

    fn stub(&self, name: &str, exit: &str) {
        let path = self.root.path().join(name);
        let log = self.log();
        fs::write(
            path.as_path(),
            format!(
                "#!/bin/sh\necho \"{name} $*\" >> '{}'\nexit {exit}\n",
                log.display()
            ),
        )
        .unwrap();
        fs::set_permissions(path.as_path(), fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn log(&self) -> PathBuf {
        self.root.path().join("calls.log")
    }

    /// Canonical, as the deploy binary sees it through its current directory.
    fn workdir(&self) -> PathBuf {
        self.root.path().join("widget").canonicalize().unwrap()
    }

    fn deploy(&self) -> Command {
        let _ = fs::remove_file(self.log());
        let mut command = Command::cargo_bin("deploy").unwrap();
        command
            .current_dir(self.workdir())
            .env("HELM_BIN", self.root.path().join("helm"))
            .env("KUBECTL_BIN", self.root.path().join("kubectl"))
            .env_remove("DEPLOY_VALUES_DIR");
        command
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

// One test drives every scenario so the stub scripts are never written while another test is
// spawning processes.
#[test]
fn deploys_through_external_tools() {
    let workspace = Workspace::new();
    let chart_dir = display(&workspace.workdir().join("charts/widget"));
    let values = display(&workspace.workdir().join("../values-staging.yaml"));

    // Production, as released.
    workspace
        .deploy()
        .args(["-e", "staging", "-p", "-v", "1.2.3"])
        .assert()
        .success();
    assert_eq!(
        workspace.calls(),
        vec![
            format!("kubectl apply -f {chart_dir}/crds"),
            "helm repo add --force-update uni-widget https://nscaledev.github.io/uni-widget"
                .to_string(),
            format!(
                "helm upgrade --install --create-namespace --namespace unikorn-widget widget uni-widget/widget -f {values} --version 1.2.3"
            ),
        ]
    );

    // Template mode renders the working copy only.
    workspace
        .deploy()
        .args(["-t", "-n", "dev"])
        .assert()
        .success();
    assert_eq!(
        workspace.calls(),
        vec![format!(
            "helm template --namespace dev-widget --no-hooks --skip-tests widget {chart_dir}"
        )]
    );

    // The failing tool's exit status is propagated.
    workspace
        .deploy()
        .env("HELM_EXIT", "7")
        .assert()
        .code(7);
    assert_eq!(workspace.calls().len(), 2);

    // Nothing runs on a usage error.
    workspace.deploy().arg("-q").assert().code(1);
    assert!(workspace.calls().is_empty());

    // Missing binaries are reported rather than propagated.
    workspace
        .deploy()
        .env("HELM_BIN", "/nonexistent/helm")
        .env("KUBECTL_BIN", "/nonexistent/kubectl")
        .assert()
        .code(1);
}
