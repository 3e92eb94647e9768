//! Record source: parses delimited input files into row-key/value records.

use std::collections::BTreeMap;
use std::path::Path;

use log::trace;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error_handling::SourceError;

/// Reads a delimited input file into a row-key/value mapping.
///
/// Each line is split on the FIRST occurrence of `delimiter` into a row key
/// and a value, so the value may itself contain the delimiter. Duplicate row
/// keys within the file resolve last-write-wins: the later line overwrites
/// the earlier one. The mapping is a `BTreeMap`, so downstream iteration
/// order is deterministic (sorted by row key).
///
/// # Errors
///
/// * `SourceError::Read` if the file cannot be located or opened.
/// * `SourceError::Parse` if any line lacks the delimiter. A single
///   malformed line fails the whole file; no records are returned.
pub async fn read_records(
    path: &Path,
    delimiter: char,
) -> Result<BTreeMap<String, String>, SourceError> {
    let read_err = |source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(read_err)?;
    let mut lines = BufReader::new(file).lines();

    let mut records = BTreeMap::new();
    let mut line_number = 0usize;
    while let Some(line) = lines.next_line().await.map_err(read_err)? {
        line_number += 1;
        let Some((row_key, value)) = line.split_once(delimiter) else {
            return Err(SourceError::Parse {
                path: path.to_path_buf(),
                line_number,
                delimiter,
            });
        };
        records.insert(row_key.to_string(), value.to_string());
    }

    trace!("{}: {} record(s) read", path.display(), records.len());
    Ok(records)
}
