//! Store connection management.
//!
//! This module opens the SQLite-backed table store with:
//! - WAL mode enabled for concurrent access
//! - Automatic database file creation
//! - Schema bootstrap for the table catalog and the cell data

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{debug, error, info};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::StoreError;
use crate::store::admin::StoreAdmin;
use crate::store::table::TableHandle;

/// Shared handle to the underlying connection pool.
pub type StorePool = Arc<Pool<Sqlite>>;

/// An open connection to the table store.
///
/// The connection owns the pool that admin and table handles borrow from.
/// It is scoped to one pipeline run: opened, used, and closed within a
/// single invocation, never shared across runs.
pub struct StoreConnection {
    pool: StorePool,
}

impl StoreConnection {
    /// Opens the store backed by the SQLite file at `store_path`.
    ///
    /// Creates the database file if it doesn't exist and enables WAL mode
    /// for better concurrent access, then bootstraps the catalog and cell
    /// schema.
    pub async fn open(store_path: &Path) -> Result<Self, StoreError> {
        let store_path_str = store_path.to_string_lossy().to_string();
        match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&store_path_str)
        {
            Ok(_) => info!("Store file created successfully."),
            Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
                info!("Store file already exists.")
            }
            Err(e) => {
                error!("Failed to create store file: {e}");
                return Err(StoreError::Sql(sqlx::Error::Io(e)));
            }
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}", store_path_str))
            .await
            .map_err(|e| {
                error!("Failed to connect to store: {e}");
                StoreError::Sql(e)
            })?;

        // Enable WAL mode
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await
            .map_err(|e| {
                error!("Failed to set WAL mode: {e}");
                StoreError::Sql(e)
            })?;

        let connection = StoreConnection {
            pool: Arc::new(pool),
        };
        connection.bootstrap_schema().await?;
        Ok(connection)
    }

    /// Opens an in-memory store, used by tests.
    ///
    /// The pool is pinned to a single connection: each new `sqlite::memory:`
    /// connection would otherwise be a separate, empty database.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let connection = StoreConnection {
            pool: Arc::new(pool),
        };
        connection.bootstrap_schema().await?;
        Ok(connection)
    }

    /// Creates the catalog and cell tables if they don't exist.
    async fn bootstrap_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS table_catalog (
                table_name TEXT PRIMARY KEY,
                column_family BLOB NOT NULL,
                state TEXT NOT NULL DEFAULT 'enabled'
            )",
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS table_cells (
                table_name TEXT NOT NULL,
                row_key TEXT NOT NULL,
                column_family BLOB NOT NULL,
                column_qualifier BLOB NOT NULL,
                cell_value TEXT NOT NULL,
                PRIMARY KEY (table_name, row_key, column_family, column_qualifier)
            )",
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    /// Returns an admin handle for table lifecycle operations.
    pub fn admin(&self) -> StoreAdmin {
        StoreAdmin::new(Arc::clone(&self.pool))
    }

    /// Opens a handle to the named table.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TableNotFound` if the table has not been created.
    pub async fn table(&self, name: &str) -> Result<TableHandle, StoreError> {
        let exists = self.admin().table_exists(name).await?;
        if !exists {
            return Err(StoreError::TableNotFound(name.to_string()));
        }
        Ok(TableHandle::new(Arc::clone(&self.pool), name.to_string()))
    }

    /// Closes the connection, waiting for the pool to drain.
    pub async fn close(self) {
        self.pool.close().await;
        debug!("store connection closed");
    }
}
