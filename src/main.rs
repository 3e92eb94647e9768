//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `table_transfer` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use table_transfer::initialization::init_logger_with;
use table_transfer::{run_pipeline, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the pipeline using the library
    match run_pipeline(config).await {
        Ok(report) => {
            println!(
                "Loaded {} file{} ({} record{}) into {}, transformed {} record{} into {} in {:.1}s",
                report.files_ingested,
                if report.files_ingested == 1 { "" } else { "s" },
                report.records_loaded,
                if report.records_loaded == 1 { "" } else { "s" },
                report.source_table,
                report.records_transformed,
                if report.records_transformed == 1 { "" } else { "s" },
                report.target_table,
                report.elapsed_seconds
            );
            println!("Results saved in {}", report.store_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("table_transfer error: {:#}", e);
            process::exit(1);
        }
    }
}
