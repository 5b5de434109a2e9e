//! Stencil CLI - validates a template corpus and writes compliance reports
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

use std::io;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use stencil_cli::{Cli, render_summary};
use stencil_engine::ValidationEngine;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "stencil_engine=debug,stencil_core=debug,stencil_cli=debug"
    } else {
        "stencil_engine=info,stencil_cli=info"
    };

    Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// Runs one validation; `Ok(false)` means the run completed with failures.
async fn run(cli: &Cli) -> Result<bool> {
    let config = cli
        .resolve_config()
        .context("Failed to load configuration")?;
    info!("Validating templates under {}", config.project_root.display());

    let outcome = ValidationEngine::new(config)
        .run()
        .await
        .context("Validation run aborted")?;

    #[allow(clippy::print_stdout, reason = "Console summary output")]
    {
        print!("{}", render_summary(&outcome));
    }

    Ok(outcome.success)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
