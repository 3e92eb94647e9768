//! Shared test helpers for store module tests.
//!
//! This module provides common utilities for store setup used across store
//! and pipeline tests.

use crate::store::connection::StoreConnection;
use crate::store::models::TableDescriptor;
use crate::store::table::TableHandle;

/// Creates an in-memory store connection with the schema bootstrapped.
pub async fn create_test_connection() -> StoreConnection {
    StoreConnection::open_in_memory()
        .await
        .expect("Failed to open in-memory store")
}

/// Creates a table with column family `cf` and returns a handle to it.
pub async fn create_test_table(connection: &StoreConnection, name: &str) -> TableHandle {
    connection
        .admin()
        .create_table(&TableDescriptor::new(name, "cf"))
        .await
        .expect("Failed to create test table");
    connection
        .table(name)
        .await
        .expect("Failed to open test table")
}
