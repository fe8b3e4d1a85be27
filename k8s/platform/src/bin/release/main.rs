use crate::opts::CliArgs;
use clap::{error::ErrorKind, Parser};
use platform::{
    common::error::Result,
    release::{components_from, Toolchain},
};
use std::{io, process};
use tracing::{error, info};
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

    if let Err(error) = release(&opts) {
        error!(%error, "Failed to release");
        process::exit(1);
    }
}

/// Initialize logging components -- tracing.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

/// Validates every selected component before releasing any of them.
fn release(opts: &CliArgs) -> Result<()> {
    let components = components_from(opts.from_step())?;
    let tools = Toolchain::default();

    for component in components {
        component.validate(opts.workspace(), &tools)?;
    }

    for component in components {
        component.release(opts.workspace(), opts.version(), &tools, io::stdin().lock())?;
    }

    info!(version = %opts.version(), "Released all components");

    Ok(())
}
