//! Ledger engine of HotelPro.
//!
//! - typed records for income, expenses, staff, attendance and salary
//!   transactions;
//! - a [`Store`] mirroring them in memory and syncing each mutation to a
//!   [`RemoteStore`];
//! - pure aggregations over a [`Snapshot`] in [`stats`].

pub use amount::Amount;
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use entity::Entity;
pub use error::{
    EngineError, LoadError, RemoteError, SyncError, TableFailure, ValidationError,
};
pub use expenses::{ExpenseCategory, ExpenseEntry, PaymentMode};
pub use income::{IncomeEntry, IncomeSource};
pub use remote::{MemoryRemote, RemoteStore, Row, row_id};
pub use salary_transactions::{SalaryTransaction, SalaryTransactionKind};
pub use snapshot::{RecordRef, Snapshot};
pub use staff::{StaffMember, StaffRole};
pub use store::{LoadState, Store, StoreBuilder, SyncStatus};
pub use table::Table;
pub use util::{DATE_FORMAT, parse_date};

mod amount;
mod attendance;
mod entity;
mod error;
mod expenses;
mod income;
mod remote;
mod salary_transactions;
mod snapshot;
mod staff;
pub mod stats;
mod store;
mod table;
mod util;
