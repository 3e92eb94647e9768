use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// constants (used as defaults)
/// Default field delimiter separating row key from value in input files.
pub const DEFAULT_DELIMITER: char = ',';
/// Default column family holding the loaded values.
pub const DEFAULT_COLUMN_FAMILY: &str = "cf";
/// Default column qualifier holding the loaded values.
pub const DEFAULT_COLUMN_QUALIFIER: &str = "q";
/// Default name of the table the input files are loaded into.
pub const DEFAULT_SOURCE_TABLE: &str = "t1";
/// Default name of the table the transformed data is written to.
pub const DEFAULT_TARGET_TABLE: &str = "t2";
/// Default path of the SQLite file backing the table store.
pub const DEFAULT_STORE_PATH: &str = "./table_transfer.db";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Command-line options and run configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options except the input file list have defaults and can be overridden
/// via command-line flags. It can also be constructed programmatically via
/// `Config::default()` for library use.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// table_transfer db_in_1.csv db_in_2.csv
///
/// # With custom tables and delimiter
/// table_transfer data.tsv --delimiter ';' --source-table staging --target-table final
///
/// # With custom store path
/// table_transfer db_in_1.csv --store-path ./custom.db
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "table_transfer",
    about = "Loads delimited files into a table store, transforms the data, and writes it to a second table."
)]
pub struct Config {
    /// Input files to ingest, in load order (resolved against --data-dir)
    #[arg(value_parser, required = true)]
    pub files: Vec<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Store path (SQLite file backing the table store)
    #[arg(long, value_parser, default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    /// Directory against which input file names are resolved
    #[arg(long, value_parser, default_value = ".")]
    pub data_dir: PathBuf,

    /// Field delimiter separating the row key from the value.
    ///
    /// Only the first occurrence per line is a field boundary, so values may
    /// themselves contain the delimiter.
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Table the input files are loaded into
    #[arg(long, default_value = DEFAULT_SOURCE_TABLE)]
    pub source_table: String,

    /// Table the transformed data is written to
    #[arg(long, default_value = DEFAULT_TARGET_TABLE)]
    pub target_table: String,

    /// Column family holding the loaded values
    #[arg(long, default_value = DEFAULT_COLUMN_FAMILY)]
    pub column_family: String,

    /// Column qualifier holding the loaded values
    #[arg(long, default_value = DEFAULT_COLUMN_QUALIFIER)]
    pub column_qualifier: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            data_dir: PathBuf::from("."),
            delimiter: DEFAULT_DELIMITER,
            source_table: DEFAULT_SOURCE_TABLE.to_string(),
            target_table: DEFAULT_TARGET_TABLE.to_string(),
            column_family: DEFAULT_COLUMN_FAMILY.to_string(),
            column_qualifier: DEFAULT_COLUMN_QUALIFIER.to_string(),
        }
    }
}
