//! Contract of the durable store the engine mirrors.
//!
//! The engine never assumes a storage technology: anything able to list, upsert
//! and delete JSON rows by table can back a [`Store`](crate::Store).

use std::future::Future;

use crate::{RemoteError, Table};

mod memory;

pub use memory::MemoryRemote;

/// One remote row: a JSON object whose keys are the column names.
pub type Row = serde_json::Value;

/// Durable persistence behind the store.
pub trait RemoteStore: Send + Sync {
    /// Returns every row of `table`.
    fn fetch_all(&self, table: Table) -> impl Future<Output = Result<Vec<Row>, RemoteError>> + Send;

    /// Inserts or replaces the row with the same `id`. Must be idempotent.
    fn upsert(&self, table: Table, row: Row) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Removes the row with `id`; no-op when absent.
    fn delete(&self, table: Table, id: &str) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

impl<R: RemoteStore> RemoteStore for &R {
    fn fetch_all(&self, table: Table) -> impl Future<Output = Result<Vec<Row>, RemoteError>> + Send {
        (**self).fetch_all(table)
    }

    fn upsert(&self, table: Table, row: Row) -> impl Future<Output = Result<(), RemoteError>> + Send {
        (**self).upsert(table, row)
    }

    fn delete(&self, table: Table, id: &str) -> impl Future<Output = Result<(), RemoteError>> + Send {
        (**self).delete(table, id)
    }
}

/// Extracts the `id` column of a row.
pub fn row_id(row: &Row) -> Result<&str, RemoteError> {
    row.get("id")
        .and_then(Row::as_str)
        .ok_or_else(|| RemoteError::Decode("row without string id".to_string()))
}
