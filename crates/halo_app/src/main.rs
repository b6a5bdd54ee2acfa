mod cli;
mod credentials;
mod status;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_error;
use halo_engine::{Harvester, RunReport};

use crate::cli::Cli;
use crate::status::{exit_code, StatusPrinter};

fn main() -> ExitCode {
    let cli = Cli::parse();
    engine_logging::initialize(&cli.log_options());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            engine_error!("Could not start async runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&cli)) {
        Ok(report) => exit_code(&report.summary()),
        Err(err) => {
            engine_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<RunReport> {
    let credentials_path = cli.credentials_path()?;
    let credentials = credentials::load(&credentials_path)?;

    let harvester = Harvester::new(cli.portal_settings())?;
    let report = harvester
        .run(credentials, &cli.mission, &StatusPrinter)
        .await
        .with_context(|| format!("mission {} aborted", cli.mission))?;

    let summary = report.summary();
    println!(
        "{} downloaded, {} skipped, {} pending, {} failed",
        summary.downloaded, summary.skipped, summary.pending, summary.failed
    );
    Ok(report)
}
