use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod collector;
mod config;
mod error;
mod formatter;
mod snmp;

use cli::{Cli, OutputFormat};
use collector::{DeviceReport, SnmpCollector};
use config::AppConfig;
use error::PollError;
use formatter::{JsonFormatter, TextReporter};
use snmp::SnmpConnector;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Polls every target and reports; `Ok(false)` when at least one device failed
async fn run(cli: Cli) -> Result<bool> {
    let profile = AppConfig::load_profile(cli.profile.as_deref(), cli.hc)?;
    let config = AppConfig::new(cli.ip, cli.community, profile, cli.concurrency)?;

    let connector = Arc::new(SnmpConnector::new(
        &config.community,
        config.connection().clone(),
    ));

    // several devices: one compact document per line
    let compact = config.targets.len() > 1;
    let format = cli.format;

    let results = SnmpCollector::poll_all(connector, &config).await;

    Ok(report_all(results, |report| match format {
        OutputFormat::Text => {
            TextReporter::report(report);
            Ok(())
        }
        OutputFormat::Json if compact => {
            println!("{}", JsonFormatter::to_json_compact(report)?);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::to_json_string(report)?);
            Ok(())
        }
    }))
}

/// Hands every successful report to `render`, logging failures of either step.
/// Returns `false` when any device failed; one failure never hides the other devices.
fn report_all<F>(results: Vec<(String, Result<DeviceReport, PollError>)>, mut render: F) -> bool
where
    F: FnMut(&DeviceReport) -> Result<()>,
{
    let mut all_ok = true;
    for (target, result) in results {
        match result {
            Ok(report) => {
                if let Err(e) = render(&report) {
                    error!("Failed to report {}: {:#}", target, e);
                    all_ok = false;
                }
            }
            Err(e) => {
                error!("Failed to get interfaces table from {} ({}): {}", target, e.stage(), e);
                all_ok = false;
            }
        }
    }
    all_ok
}
