//! Batch writer: turns record mappings into store mutations and submits
//! them as one batch.

use std::collections::BTreeMap;

use log::{trace, warn};

use crate::error_handling::PipelineError;
use crate::store::{BatchOutcome, Column, Mutation, TableHandle};

/// Writes a record mapping to one column of a table as a single batch.
///
/// One mutation is built per record, in the mapping's sorted key order, and
/// all of them are submitted together - no chunking, no retries. The
/// returned outcome vector is positionally aligned with that same order:
/// `outcomes.len() == records.len()`.
///
/// Individual failed slots do not abort the call; they are counted and
/// logged at warn level for the caller to inspect.
///
/// # Errors
///
/// Returns `PipelineError::BatchSubmit` when the batch call fails as a
/// whole, wrapping the store cause. Outcome slots populated before such a
/// failure are not recovered here.
pub async fn load_records(
    table: &TableHandle,
    column: &Column,
    records: &BTreeMap<String, String>,
) -> Result<Vec<BatchOutcome>, PipelineError> {
    let mutations: Vec<Mutation> = records
        .iter()
        .map(|(row_key, value)| Mutation {
            row_key: row_key.clone(),
            column: column.clone(),
            value: value.clone(),
        })
        .collect();

    let outcomes = table
        .batch(&mutations)
        .await
        .map_err(PipelineError::BatchSubmit)?;

    let failed = outcomes.iter().filter(|o| !o.is_applied()).count();
    if failed > 0 {
        warn!(
            "{} of {} mutation(s) failed while loading {}",
            failed,
            outcomes.len(),
            table.name()
        );
    }
    trace!("data loaded to {}: {} record(s)", table.name(), records.len());
    Ok(outcomes)
}
