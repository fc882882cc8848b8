//! In-process remote store.
//!
//! Used as the `memory` backend of the binary and as the remote side of the
//! engine tests: it can be switched offline or made to fail on chosen tables.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{RemoteStore, Row, row_id};
use crate::{RemoteError, Table};

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<Table, BTreeMap<String, Row>>,
    offline: bool,
    failing: HashSet<Table>,
    calls: usize,
}

/// Tables held in memory, keyed by id. Clones share the same tables.
#[derive(Clone, Debug, Default)]
pub struct MemoryRemote {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds `table` with `rows`, replacing rows with the same id.
    pub fn seed(&self, table: Table, rows: impl IntoIterator<Item = Row>) -> Result<(), RemoteError> {
        let mut tables = self.lock();
        let target = tables.rows.entry(table).or_default();
        for row in rows {
            let id = row_id(&row)?.to_string();
            target.insert(id, row);
        }
        Ok(())
    }

    /// Current rows of `table`, ordered by id.
    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.lock()
            .rows
            .get(&table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn row(&self, table: Table, id: &str) -> Option<Row> {
        self.lock().rows.get(&table).and_then(|rows| rows.get(id).cloned())
    }

    /// Makes every call fail with a transport error while `offline` is set.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Makes every call touching `table` fail with a rejection.
    pub fn fail_table(&self, table: Table) {
        self.lock().failing.insert(table);
    }

    pub fn heal_table(&self, table: Table) {
        self.lock().failing.remove(&table);
    }

    /// Number of calls received so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn check(&self, table: Table) -> Result<MutexGuard<'_, Tables>, RemoteError> {
        let mut tables = self.lock();
        tables.calls += 1;
        if tables.offline {
            return Err(RemoteError::Transport("remote is offline".to_string()));
        }
        if tables.failing.contains(&table) {
            return Err(RemoteError::Rejected(format!("{table} is unavailable")));
        }
        Ok(tables)
    }
}

impl RemoteStore for MemoryRemote {
    async fn fetch_all(&self, table: Table) -> Result<Vec<Row>, RemoteError> {
        let tables = self.check(table)?;
        Ok(tables
            .rows
            .get(&table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert(&self, table: Table, row: Row) -> Result<(), RemoteError> {
        if !row.is_object() {
            return Err(RemoteError::Rejected("row must be an object".to_string()));
        }
        let id = row_id(&row)?.to_string();
        let mut tables = self.check(table)?;
        tables.rows.entry(table).or_default().insert(id, row);
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), RemoteError> {
        let mut tables = self.check(table)?;
        if let Some(rows) = tables.rows.get_mut(&table) {
            rows.remove(id);
        }
        Ok(())
    }
}
