use crate::opts::CliArgs;
use clap::{error::ErrorKind, Parser};
use platform::{
    common::error::{CurrentDir, Result},
    deploy::{DeployOptions, DeployPlan},
};
use snafu::ResultExt;
use std::process;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod opts;

fn main() {
    init_logging();

    let opts = CliArgs::try_parse().unwrap_or_else(|error| match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
        _ => {
            _ = error.print();
            process::exit(1);
        }
    });

    match deploy(opts.into()) {
        Ok(code) => process::exit(code),
        Err(error) => {
            error!(%error, "Failed to deploy");
            process::exit(1);
        }
    }
}

/// Initialize logging components -- tracing.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the deployment of the current working copy and runs it.
fn deploy(options: DeployOptions) -> Result<i32> {
    let workdir = std::env::current_dir().context(CurrentDir)?;
    let plan = DeployPlan::resolve(&options, workdir);

    for command in plan.commands() {
        debug!(%command, "Planned command");
    }

    plan.execute()
}
