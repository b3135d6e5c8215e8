//! Hue CLI entry point.

use anyhow::Context;
use clap::Parser;
use hue_cli::app::{App, render};
use hue_cli::logging::setup_logging;
use hue_cli::{Cli, HueConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.effective_log_level(), cli.json_logs);

    let config =
        HueConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;

    let app = App::start(&config).await?;
    let result = app.execute(&cli.command).await;
    app.shutdown().await;

    println!("{}", render(&result?, cli.pretty)?);
    Ok(())
}
