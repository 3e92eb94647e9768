//! Table scanner: reads one column's values across all rows of a table.

use std::collections::BTreeMap;

use log::trace;

use crate::error_handling::PipelineError;
use crate::store::{Column, TableHandle};

/// Scans one column address of a table into a row-key/value mapping.
///
/// The scan cursor is driven to exhaustion and released when this function
/// returns - on the success path by exhausting it, on the error path by
/// dropping it before the error propagates.
///
/// # Errors
///
/// Returns `PipelineError::Scan` if the cursor cannot be opened or fails
/// mid-iteration.
pub async fn scan_column(
    table: &TableHandle,
    column: &Column,
) -> Result<BTreeMap<String, String>, PipelineError> {
    let mut scanner = table.scan(column).await.map_err(PipelineError::Scan)?;

    let mut data = BTreeMap::new();
    while let Some((row_key, value)) = scanner.next_row().await.map_err(PipelineError::Scan)? {
        data.insert(row_key, value);
    }

    trace!("{}: {} row(s) scanned", table.name(), data.len());
    Ok(data)
}
