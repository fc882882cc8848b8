//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`ValidationError`] thrown when a record is rejected at the mutation
//!   boundary, before it reaches the in-memory collections.
//! - [`LoadError`] thrown by [`Store::initialize`] when one or more tables
//!   could not be fetched.
//! - [`RemoteError`] returned by a [`RemoteStore`] adapter.
//! - [`SyncError`] produced while pushing a record; it never leaves the store,
//!   it is logged and turned into a failed sync status.
//!
//!  [`Store::initialize`]: crate::Store::initialize
//!  [`RemoteStore`]: crate::RemoteStore
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::Table;

/// A malformed entity, rejected before touching local state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid amount: {0} is not a finite number")]
    NonFiniteAmount(f64),
    #[error("Invalid amount: {0} is negative")]
    NegativeAmount(f64),
    #[error("Invalid date \"{0}\", expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),
    #[error("\"{0}\" staff member not found!")]
    UnknownStaff(String),
    #[error("{staff_id} already has an attendance record on {date}")]
    AttendanceTaken { staff_id: String, date: NaiveDate },
    #[error("Invalid {table} row: {reason}")]
    InvalidRow { table: Table, reason: String },
}

/// Error returned by a remote store adapter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("remote rejected the request: {0}")]
    Rejected(String),
    #[error("malformed remote data: {0}")]
    Decode(String),
}

/// One table that could not be fetched during initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFailure {
    pub table: Table,
    pub reason: String,
}

impl fmt::Display for TableFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.table, self.reason)
    }
}

/// Startup fetch failed for at least one table. Those tables stay empty.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to load {}", join_failures(.failures))]
pub struct LoadError {
    pub failures: Vec<TableFailure>,
}

impl LoadError {
    /// Returns `true` if `table` is among the failed ones.
    pub fn failed(&self, table: Table) -> bool {
        self.failures.iter().any(|failure| failure.table == table)
    }
}

fn join_failures(failures: &[TableFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure while pushing one record to the remote store.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("cannot encode row: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Engine custom errors.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
