// src/main.rs
use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::debug;

use sshmon_check_elasticsearch::{
    config::{self, ProbeConfig},
    health::HealthProbe,
};

const PROJECT_URL: &str = "https://github.com/indece-official/sshmon-check-elasticsearch";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Initialize tracing; stdout is reserved for the check result
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
        .context("Failed to install log subscriber")?;

    let cli = match config::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    if cli.version {
        print_version();
        return Ok(ExitCode::SUCCESS);
    }

    let config = ProbeConfig::from(cli);
    debug!("Probe configuration: {:?}", config);

    let report = HealthProbe::new(config).run().await;
    println!("{}", report);

    Ok(ExitCode::from(report.exit_status()))
}

fn print_version() {
    println!(
        "{} {} (Build {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("BUILD_DATE").unwrap_or("unknown")
    );
    println!();
    println!("{}", PROJECT_URL);
    println!();
    println!("Copyright 2020 by indece UG (haftungsbeschränkt)");
}
