//! Initial schema: the five ledger tables.
//!
//! - `income`: money received, by source
//! - `expenses`: money spent, by category and payment mode
//! - `staff`: employees and their monthly salary
//! - `attendance`: one presence mark per staff member and day
//! - `salary_transactions`: salary payments and advances
//!
//! Dates are stored as `YYYY-MM-DD` text, amounts as doubles.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Income {
    Table,
    Id,
    Date,
    Source,
    Amount,
    Notes,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Date,
    Category,
    Amount,
    PaymentMode,
    Notes,
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
    Name,
    Role,
    MonthlySalary,
    JoiningDate,
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    StaffId,
    Date,
    Status,
}

#[derive(Iden)]
enum SalaryTransactions {
    Table,
    Id,
    StaffId,
    Date,
    Amount,
    #[iden = "type"]
    Kind,
    Notes,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Income
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Income::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Income::Date).string().not_null())
                    .col(ColumnDef::new(Income::Source).string().not_null())
                    .col(ColumnDef::new(Income::Amount).double().not_null())
                    .col(ColumnDef::new(Income::Notes).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-income-date")
                    .table(Income::Table)
                    .col(Income::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Date).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Expenses::PaymentMode)
                            .string()
                            .not_null()
                            .default("Cash"),
                    )
                    .col(ColumnDef::new(Expenses::Notes).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Staff
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Staff::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Staff::Name).string().not_null())
                    .col(ColumnDef::new(Staff::Role).string().not_null())
                    .col(ColumnDef::new(Staff::MonthlySalary).double().not_null())
                    .col(ColumnDef::new(Staff::JoiningDate).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Attendance
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StaffId).string().not_null())
                    .col(ColumnDef::new(Attendance::Date).string().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attendance-staff_id")
                            .from(Attendance::Table, Attendance::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attendance-staff_id-date-unique")
                    .table(Attendance::Table)
                    .col(Attendance::StaffId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Salary transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SalaryTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalaryTransactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SalaryTransactions::StaffId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalaryTransactions::Date).string().not_null())
                    .col(ColumnDef::new(SalaryTransactions::Amount).double().not_null())
                    .col(ColumnDef::new(SalaryTransactions::Kind).string().not_null())
                    .col(ColumnDef::new(SalaryTransactions::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-salary_transactions-staff_id")
                            .from(SalaryTransactions::Table, SalaryTransactions::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-salary_transactions-staff_id-date")
                    .table(SalaryTransactions::Table)
                    .col(SalaryTransactions::StaffId)
                    .col(SalaryTransactions::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SalaryTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Income::Table).to_owned())
            .await?;
        Ok(())
    }
}
