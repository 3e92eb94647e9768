//! table_transfer library: batch movement of delimited records through a
//! column-family table store.
//!
//! The pipeline loads row-key/value records from delimited text files into a
//! source table, scans them back out of one column address, upper-cases the
//! values, and writes the result to a target table. Table provisioning is
//! idempotent on the create path and deliberately not on the drop path.
//!
//! # Example
//!
//! ```no_run
//! use table_transfer::{run_pipeline, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     files: vec![PathBuf::from("db_in_1.csv")],
//!     ..Default::default()
//! };
//!
//! let report = run_pipeline(config).await?;
//! println!("Loaded {} record(s) into {}", report.records_loaded, report.source_table);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

pub mod config;
mod error_handling;
pub mod initialization;
pub mod load;
pub mod provision;
pub mod scan;
pub mod source;
pub mod store;
pub mod transform;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, PipelineError, SourceError, StoreError};
pub use run::{run_pipeline, RunReport};

// Internal run module (contains the pipeline driver)
mod run {
    use std::path::PathBuf;

    use anyhow::{bail, Context, Result};
    use log::info;

    use crate::config::Config;
    use crate::error_handling::PipelineError;
    use crate::load::load_records;
    use crate::provision::ensure_table;
    use crate::scan::scan_column;
    use crate::source::read_records;
    use crate::store::{Column, StoreConnection};
    use crate::transform::uppercase_values;

    /// Results of a completed pipeline run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Number of input files ingested into the source table
        pub files_ingested: usize,
        /// Total records loaded into the source table across all files
        pub records_loaded: usize,
        /// Records scanned, transformed, and written to the target table
        pub records_transformed: usize,
        /// Name of the source table
        pub source_table: String,
        /// Name of the target table
        pub target_table: String,
        /// Path to the SQLite file backing the store
        pub store_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the full pipeline with the provided configuration.
    ///
    /// Stages run strictly in sequence, each exactly once per call:
    /// connect, provision the source table, ingest each input file in the
    /// given order, scan the source column, transform the values, provision
    /// the target table, write the target table, close. The store
    /// connection is released on every exit path; a failing stage aborts
    /// the run and propagates its cause after cleanup.
    ///
    /// # Errors
    ///
    /// Any stage failure surfaces as an error carrying the stage's
    /// [`PipelineError`](crate::PipelineError) classification and the
    /// underlying cause. There are no retries and no partial-success
    /// results: the caller either gets a full [`RunReport`] or an error.
    pub async fn run_pipeline(config: Config) -> Result<RunReport> {
        if config.files.is_empty() {
            bail!("no input files given");
        }

        let start_time = std::time::Instant::now();
        info!(
            "starting pipeline run: {} input file(s), {} -> {}",
            config.files.len(),
            config.source_table,
            config.target_table
        );

        let connection = StoreConnection::open(&config.store_path)
            .await
            .context("failed to open store connection")?;

        // The connection is closed on both outcomes before the result is
        // inspected; table handles inside drive() are dropped on error.
        let result = drive(&connection, &config).await;
        connection.close().await;
        let (records_loaded, records_transformed) = result?;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "pipeline run completed in {:.2}s ({} record(s) transformed)",
            elapsed_seconds, records_transformed
        );

        Ok(RunReport {
            files_ingested: config.files.len(),
            records_loaded,
            records_transformed,
            source_table: config.source_table.clone(),
            target_table: config.target_table.clone(),
            store_path: config.store_path.clone(),
            elapsed_seconds,
        })
    }

    /// Executes the provisioning, ingestion, scan, transform, and re-load
    /// stages against an open connection.
    async fn drive(connection: &StoreConnection, config: &Config) -> Result<(usize, usize)> {
        let column = Column::new(
            config.column_family.as_bytes(),
            config.column_qualifier.as_bytes(),
        );
        let admin = connection.admin();

        ensure_table(&admin, &config.source_table, &column.family).await?;
        let source_table = connection
            .table(&config.source_table)
            .await
            .map_err(PipelineError::Provision)?;

        let mut records_loaded = 0usize;
        for file in &config.files {
            let path = config.data_dir.join(file);
            let records = read_records(&path, config.delimiter)
                .await
                .map_err(PipelineError::from)?;
            load_records(&source_table, &column, &records).await?;
            records_loaded += records.len();
            info!("{}: loaded into {}", path.display(), config.source_table);
        }

        let data = scan_column(&source_table, &column).await?;
        let transformed = uppercase_values(&data);

        ensure_table(&admin, &config.target_table, &column.family).await?;
        let target_table = connection
            .table(&config.target_table)
            .await
            .map_err(PipelineError::Provision)?;
        load_records(&target_table, &column, &transformed).await?;

        source_table.close();
        target_table.close();
        Ok((records_loaded, transformed.len()))
    }
}
