//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `caa_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Printing the report as JSON
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use caa_check::initialization::init_logger_with;
use caa_check::{run_check, Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from(Cli::parse());

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = config.validate() {
        eprintln!("caa_check error: {e}");
        process::exit(2);
    }

    // A report carrying a fatal error is still a successful run
    let report = run_check(&config).await;
    let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
    println!("{json}");
    Ok(())
}
