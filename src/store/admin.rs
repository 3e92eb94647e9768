//! Table lifecycle operations: create, disable, delete.

use log::debug;

use crate::error_handling::StoreError;
use crate::store::connection::StorePool;
use crate::store::models::TableDescriptor;

/// Administrative handle for table lifecycle operations.
///
/// Borrowed from an open [`StoreConnection`](crate::store::StoreConnection);
/// does not outlive the run that created it.
pub struct StoreAdmin {
    pool: StorePool,
}

impl StoreAdmin {
    pub(crate) fn new(pool: StorePool) -> Self {
        StoreAdmin { pool }
    }

    /// Creates a table from the descriptor.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TableExists` if a table with the same name is
    /// already in the catalog. Callers that want create-if-absent semantics
    /// recover that variant themselves (see `provision::ensure_table`).
    pub async fn create_table(&self, descriptor: &TableDescriptor) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO table_catalog (table_name, column_family) VALUES (?, ?)")
            .bind(&descriptor.name)
            .bind(&descriptor.column_family)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(_) => {
                debug!("table registered in catalog: {}", descriptor.name);
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::TableExists(descriptor.name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns whether the named table exists in the catalog.
    pub async fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM table_catalog WHERE table_name = ?")
                .bind(name)
                .fetch_one(self.pool.as_ref())
                .await?;
        Ok(count > 0)
    }

    /// Marks the table disabled, rejecting subsequent reads and writes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TableNotFound` if the table does not exist.
    pub async fn disable_table(&self, name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE table_catalog SET state = 'disabled' WHERE table_name = ?")
            .bind(name)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::TableNotFound(name.to_string()));
        }
        debug!("table disabled: {name}");
        Ok(())
    }

    /// Deletes the table and all of its cells.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TableNotFound` if the table does not exist.
    pub async fn delete_table(&self, name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM table_catalog WHERE table_name = ?")
            .bind(name)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::TableNotFound(name.to_string()));
        }

        sqlx::query("DELETE FROM table_cells WHERE table_name = ?")
            .bind(name)
            .execute(self.pool.as_ref())
            .await?;
        debug!("table deleted: {name}");
        Ok(())
    }

    /// Looks up the catalog state of a table, used by handles to gate reads
    /// and writes.
    pub(crate) async fn table_state(&self, name: &str) -> Result<Option<String>, StoreError> {
        let state: Option<String> =
            sqlx::query_scalar("SELECT state FROM table_catalog WHERE table_name = ?")
                .bind(name)
                .fetch_optional(self.pool.as_ref())
                .await?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_helpers::create_test_connection;

    #[tokio::test]
    async fn test_create_then_exists() {
        let connection = create_test_connection().await;
        let admin = connection.admin();

        let descriptor = TableDescriptor::new("t1", "cf");
        admin.create_table(&descriptor).await.unwrap();
        assert!(admin.table_exists("t1").await.unwrap());
        assert!(!admin.table_exists("t2").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate_reports_exists() {
        let connection = create_test_connection().await;
        let admin = connection.admin();

        let descriptor = TableDescriptor::new("t1", "cf");
        admin.create_table(&descriptor).await.unwrap();
        let err = admin.create_table(&descriptor).await.unwrap_err();
        assert!(matches!(err, StoreError::TableExists(name) if name == "t1"));
    }

    #[tokio::test]
    async fn test_disable_missing_table_errors() {
        let connection = create_test_connection().await;
        let admin = connection.admin();

        let err = admin.disable_table("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound(name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_delete_missing_table_errors() {
        let connection = create_test_connection().await;
        let admin = connection.admin();

        let err = admin.delete_table("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn test_disable_then_delete_removes_table() {
        let connection = create_test_connection().await;
        let admin = connection.admin();

        admin
            .create_table(&TableDescriptor::new("t1", "cf"))
            .await
            .unwrap();
        admin.disable_table("t1").await.unwrap();
        admin.delete_table("t1").await.unwrap();
        assert!(!admin.table_exists("t1").await.unwrap());
    }
}
