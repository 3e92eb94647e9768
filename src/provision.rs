//! Table provisioning: idempotent create, non-idempotent drop.

use log::{debug, info};

use crate::error_handling::{PipelineError, StoreError};
use crate::store::{StoreAdmin, TableDescriptor};

/// Creates a table if it does not already exist.
///
/// If a table with the same name is already present, the store's
/// `TableExists` error is recovered locally: it is logged at info level and
/// the descriptor is returned as if the table had just been created. Calling
/// this twice in a row with the same arguments therefore never fails.
///
/// # Errors
///
/// Any other admin failure is fatal and surfaces as
/// `PipelineError::Provision`.
pub async fn ensure_table(
    admin: &StoreAdmin,
    table_name: &str,
    column_family: &[u8],
) -> Result<TableDescriptor, PipelineError> {
    let descriptor = TableDescriptor::new(table_name, column_family);
    match admin.create_table(&descriptor).await {
        Ok(()) => {
            debug!("table created: {table_name}");
            Ok(descriptor)
        }
        Err(StoreError::TableExists(_)) => {
            info!("table {table_name} already exists");
            Ok(descriptor)
        }
        Err(e) => Err(PipelineError::Provision(e)),
    }
}

/// Disables and then deletes a table.
///
/// Unlike [`ensure_table`], this is NOT idempotent: dropping a table that
/// does not exist is a fatal error. The asymmetry with the create path is
/// deliberate - see DESIGN.md - and makes drop-using scripts unsafe to
/// re-run, while create-only scripts are safe.
pub async fn drop_table(admin: &StoreAdmin, table_name: &str) -> Result<(), PipelineError> {
    admin
        .disable_table(table_name)
        .await
        .map_err(PipelineError::Provision)?;
    admin
        .delete_table(table_name)
        .await
        .map_err(PipelineError::Provision)?;
    debug!("table dropped: {table_name}");
    Ok(())
}
