//! Error type definitions.
//!
//! This module defines all error types used throughout the application,
//! grouped by the subsystem that raises them.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while reading records from a delimited input file.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The input file could not be located or opened.
    #[error("failed to read input file {}: {}", .path.display(), .source)]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// A line did not split into two fields on the delimiter.
    #[error("malformed line {} in {}: expected two fields separated by {:?}", .line_number, .path.display(), .delimiter)]
    Parse {
        /// Path of the file containing the malformed line.
        path: PathBuf,
        /// 1-based line number of the malformed line.
        line_number: usize,
        /// The delimiter the line was expected to contain.
        delimiter: char,
    },
}

/// Errors surfaced by the table store client.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A table with this name already exists.
    #[error("table {0} already exists")]
    TableExists(String),

    /// No table with this name exists.
    #[error("table {0} does not exist")]
    TableNotFound(String),

    /// The table exists but is disabled.
    #[error("table {0} is disabled")]
    TableDisabled(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

/// Fatal pipeline stage failures.
///
/// Every variant aborts the run. The one locally recovered condition,
/// "table already exists" during create, never reaches this enum; see
/// `provision::ensure_table`.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The record source failed to read or parse an input file.
    #[error("record source error: {0}")]
    Source(#[from] SourceError),

    /// Table provisioning failed for a reason other than "already exists".
    #[error("table provisioning error: {0}")]
    Provision(#[source] StoreError),

    /// A write batch failed as a whole.
    #[error("batch submit error: {0}")]
    BatchSubmit(#[source] StoreError),

    /// A table scan failed mid-iteration.
    #[error("table scan error: {0}")]
    Scan(#[source] StoreError),
}
