//! sitefig CLI - assemble documentation-site configuration.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use sitefig::SiteArgs;

#[derive(Parser)]
#[command(name = "sitefig")]
#[command(about = "Assemble documentation-site configuration from a base file and optional features")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    site: SiteArgs,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.site.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries command output
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let builder = cli.site.builder();
    let action = cli.site.into_action();
    let result = builder
        .handle_and_print(&action)
        .with_context(|| format!("sitefig {action:?} failed"))?;

    if result.is_failure() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
