//! SQL backend of the store, built on sea-orm.
//!
//! Rows are validated by the engine before they reach the database, and read
//! back as the same JSON objects the engine sends.

use engine::{
    AttendanceRecord, Entity as _, ExpenseEntry, IncomeEntry, RemoteError, RemoteStore, Row,
    SalaryTransaction, StaffMember, Table,
};
use sea_orm::{Database, DatabaseConnection, DbErr, EntityTrait, sea_query::OnConflict};
use tracing::debug;

pub mod entities;

use entities::{attendance, expenses, income, salary_transactions, staff};

/// A [`RemoteStore`] over a sea-orm connection.
///
/// The schema is the one created by the `migration` crate.
#[derive(Clone, Debug)]
pub struct DatabaseRemote {
    db: DatabaseConnection,
}

impl DatabaseRemote {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a connection to `url`, e.g. `sqlite:./hotelpro.db?mode=rwc`.
    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        Ok(Self::new(Database::connect(url).await?))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn db_error(err: DbErr) -> RemoteError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RemoteError::Transport(err.to_string()),
        other => RemoteError::Rejected(other.to_string()),
    }
}

/// Lists every row of `$entity` as JSON.
macro_rules! fetch_rows {
    ($self:expr, $entity:ident) => {{
        $entity::Entity::find()
            .all(&$self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|model| {
                serde_json::to_value(model).map_err(|err| RemoteError::Decode(err.to_string()))
            })
            .collect::<Result<Vec<Row>, RemoteError>>()
    }};
}

/// Decodes `$row` as `$record` and inserts it, replacing `$columns` of the
/// row with the same id.
macro_rules! upsert_row {
    ($self:expr, $row:expr, $entity:ident, $record:ty, [$($column:ident),+ $(,)?]) => {{
        let record = <$record>::from_row($row)
            .map_err(|err| RemoteError::Rejected(err.to_string()))?;
        $entity::Entity::insert($entity::ActiveModel::from(&record))
            .on_conflict(
                OnConflict::column($entity::Column::Id)
                    .update_columns([$($entity::Column::$column),+])
                    .to_owned(),
            )
            .exec_without_returning(&$self.db)
            .await
            .map_err(db_error)?;
    }};
}

impl RemoteStore for DatabaseRemote {
    async fn fetch_all(&self, table: Table) -> Result<Vec<Row>, RemoteError> {
        let rows = match table {
            Table::Income => fetch_rows!(self, income)?,
            Table::Expenses => fetch_rows!(self, expenses)?,
            Table::Staff => fetch_rows!(self, staff)?,
            Table::Attendance => fetch_rows!(self, attendance)?,
            Table::SalaryTransactions => fetch_rows!(self, salary_transactions)?,
        };
        debug!(table = %table, rows = rows.len(), "fetched");
        Ok(rows)
    }

    async fn upsert(&self, table: Table, row: Row) -> Result<(), RemoteError> {
        match table {
            Table::Income => {
                upsert_row!(self, row, income, IncomeEntry, [Date, Source, Amount, Notes])
            }
            Table::Expenses => upsert_row!(
                self,
                row,
                expenses,
                ExpenseEntry,
                [Date, Category, Amount, PaymentMode, Notes]
            ),
            Table::Staff => upsert_row!(
                self,
                row,
                staff,
                StaffMember,
                [Name, Role, MonthlySalary, JoiningDate]
            ),
            Table::Attendance => upsert_row!(
                self,
                row,
                attendance,
                AttendanceRecord,
                [StaffId, Date, Status]
            ),
            Table::SalaryTransactions => upsert_row!(
                self,
                row,
                salary_transactions,
                SalaryTransaction,
                [StaffId, Date, Amount, Kind, Notes]
            ),
        }
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), RemoteError> {
        let id = id.to_string();
        let result = match table {
            Table::Income => income::Entity::delete_by_id(id).exec(&self.db).await,
            Table::Expenses => expenses::Entity::delete_by_id(id).exec(&self.db).await,
            Table::Staff => staff::Entity::delete_by_id(id).exec(&self.db).await,
            Table::Attendance => attendance::Entity::delete_by_id(id).exec(&self.db).await,
            Table::SalaryTransactions => {
                salary_transactions::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await
            }
        }
        .map_err(db_error)?;
        debug!(table = %table, deleted = result.rows_affected, "delete");
        Ok(())
    }
}
