//! Table handles: batched cell writes and column scans.

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::TryStreamExt;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::error_handling::StoreError;
use crate::store::admin::StoreAdmin;
use crate::store::connection::StorePool;
use crate::store::models::{BatchOutcome, Column, Mutation};

const UPSERT_CELL_SQL: &str = "INSERT INTO table_cells \
    (table_name, row_key, column_family, column_qualifier, cell_value) \
    VALUES (?, ?, ?, ?, ?) \
    ON CONFLICT(table_name, row_key, column_family, column_qualifier) \
    DO UPDATE SET cell_value = excluded.cell_value";

const SCAN_COLUMN_SQL: &str = "SELECT row_key, cell_value FROM table_cells \
    WHERE table_name = ? AND column_family = ? AND column_qualifier = ? \
    ORDER BY row_key";

/// An opened, named reference to a table in the store.
///
/// Owned by the pipeline driver for the duration of one run and never shared
/// across concurrent runs.
pub struct TableHandle {
    pool: StorePool,
    name: String,
}

impl TableHandle {
    pub(crate) fn new(pool: StorePool, name: String) -> Self {
        TableHandle { pool, name }
    }

    /// The table's name in the catalog.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submits all mutations as one batch call.
    ///
    /// Mutations are applied independently: a failing mutation marks its own
    /// outcome slot and leaves the rest of the batch untouched. The returned
    /// vector is positionally aligned with `mutations`, one outcome per slot.
    ///
    /// # Errors
    ///
    /// Fails as a whole - without per-slot outcomes - when the table is
    /// missing or disabled, or when no connection can be acquired. Callers
    /// see the store cause and decide how to classify it.
    pub async fn batch(&self, mutations: &[Mutation]) -> Result<Vec<BatchOutcome>, StoreError> {
        self.ensure_enabled().await?;

        let mut conn = self.pool.acquire().await?;
        let mut outcomes = Vec::with_capacity(mutations.len());
        for mutation in mutations {
            let applied = sqlx::query(UPSERT_CELL_SQL)
                .bind(&self.name)
                .bind(&mutation.row_key)
                .bind(&mutation.column.family)
                .bind(&mutation.column.qualifier)
                .bind(&mutation.value)
                .execute(&mut *conn)
                .await;
            outcomes.push(match applied {
                Ok(_) => BatchOutcome::Applied,
                Err(e) => BatchOutcome::Failed(e.into()),
            });
        }
        debug!("batch of {} mutation(s) submitted to {}", mutations.len(), self.name);
        Ok(outcomes)
    }

    /// Opens a scan cursor restricted to one column address.
    ///
    /// Rows come back in row-key order. The cursor is finite and not
    /// restartable; dropping it releases the underlying stream on every
    /// exit path, including mid-scan errors and caller abandonment.
    pub async fn scan(&self, column: &Column) -> Result<RowScanner<'_>, StoreError> {
        self.ensure_enabled().await?;

        let stream = sqlx::query(SCAN_COLUMN_SQL)
            .bind(self.name.clone())
            .bind(column.family.clone())
            .bind(column.qualifier.clone())
            .fetch(self.pool.as_ref());
        Ok(RowScanner { stream })
    }

    /// Releases the handle.
    pub fn close(self) {
        debug!("table handle closed: {}", self.name);
    }

    async fn ensure_enabled(&self) -> Result<(), StoreError> {
        let state = StoreAdmin::new(Arc::clone(&self.pool))
            .table_state(&self.name)
            .await?;
        match state.as_deref() {
            Some("enabled") => Ok(()),
            Some(_) => Err(StoreError::TableDisabled(self.name.clone())),
            None => Err(StoreError::TableNotFound(self.name.clone())),
        }
    }
}

/// Lazy cursor over the rows of one column scan.
///
/// Wraps the row stream of the underlying store; exhausting or dropping the
/// scanner releases the cursor.
pub struct RowScanner<'a> {
    stream: BoxStream<'a, Result<SqliteRow, sqlx::Error>>,
}

impl RowScanner<'_> {
    /// Returns the next `(row_key, value)` pair, or `None` once the scan is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// A mid-scan failure surfaces here; the cursor is unusable afterwards
    /// and is released when the scanner is dropped.
    pub async fn next_row(&mut self) -> Result<Option<(String, String)>, StoreError> {
        let Some(row) = self.stream.try_next().await? else {
            return Ok(None);
        };
        let row_key: String = row.try_get("row_key")?;
        let value: String = row.try_get("cell_value")?;
        Ok(Some((row_key, value)))
    }
}
