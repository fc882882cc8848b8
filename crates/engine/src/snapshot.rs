//! The five collections as observed at one instant.

use serde::Serialize;

use crate::{
    AttendanceRecord, Entity, ExpenseEntry, IncomeEntry, SalaryTransaction, StaffMember, Table,
};

/// Reference to one record: its table and id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordRef {
    pub table: Table,
    pub id: String,
}

impl RecordRef {
    pub fn new(table: Table, id: impl Into<String>) -> Self {
        Self {
            table,
            id: id.into(),
        }
    }

    pub fn of<E: Entity>(record: &E) -> Self {
        Self::new(E::TABLE, record.id())
    }
}

impl core::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.table, self.id)
    }
}

/// Every collection, each kept in insertion order and keyed by id.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Snapshot {
    pub income: Vec<IncomeEntry>,
    pub expenses: Vec<ExpenseEntry>,
    pub staff: Vec<StaffMember>,
    pub attendance: Vec<AttendanceRecord>,
    pub salary_transactions: Vec<SalaryTransaction>,
}

impl Snapshot {
    /// Finds a record by id.
    pub fn get<E: Entity>(&self, id: &str) -> Option<&E> {
        E::collection(self).iter().find(|r| r.id() == id)
    }

    pub fn staff_member(&self, id: &str) -> Option<&StaffMember> {
        self.get::<StaffMember>(id)
    }

    pub fn attendance_of<'a>(
        &'a self,
        staff_id: &'a str,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        self.attendance.iter().filter(move |r| r.staff_id == staff_id)
    }

    pub fn salary_transactions_of<'a>(
        &'a self,
        staff_id: &'a str,
    ) -> impl Iterator<Item = &'a SalaryTransaction> + 'a {
        self.salary_transactions
            .iter()
            .filter(move |r| r.staff_id == staff_id)
    }

    /// Returns `true` if any record with this reference exists.
    pub fn contains(&self, record: &RecordRef) -> bool {
        let id = record.id.as_str();
        match record.table {
            Table::Income => self.get::<IncomeEntry>(id).is_some(),
            Table::Expenses => self.get::<ExpenseEntry>(id).is_some(),
            Table::Staff => self.get::<StaffMember>(id).is_some(),
            Table::Attendance => self.get::<AttendanceRecord>(id).is_some(),
            Table::SalaryTransactions => self.get::<SalaryTransaction>(id).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        self.income.len()
            + self.expenses.len()
            + self.staff.len()
            + self.attendance.len()
            + self.salary_transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a record by id. Removing a staff member also removes its
    /// attendance and salary transactions.
    ///
    /// Returns what was removed, dependents first; empty when nothing matched.
    pub(crate) fn remove(&mut self, table: Table, id: &str) -> Vec<RecordRef> {
        match table {
            Table::Income => remove_by_id(&mut self.income, id),
            Table::Expenses => remove_by_id(&mut self.expenses, id),
            Table::Attendance => remove_by_id(&mut self.attendance, id),
            Table::SalaryTransactions => remove_by_id(&mut self.salary_transactions, id),
            Table::Staff => {
                let staff = remove_by_id(&mut self.staff, id);
                if staff.is_empty() {
                    return staff;
                }
                let mut removed = remove_where(&mut self.attendance, |r| r.staff_id == id);
                removed.extend(remove_where(&mut self.salary_transactions, |r| {
                    r.staff_id == id
                }));
                removed.extend(staff);
                removed
            }
        }
    }
}

fn remove_by_id<E: Entity>(collection: &mut Vec<E>, id: &str) -> Vec<RecordRef> {
    remove_where(collection, |r| r.id() == id)
}

fn remove_where<E: Entity>(collection: &mut Vec<E>, mut pred: impl FnMut(&E) -> bool) -> Vec<RecordRef> {
    let mut removed = Vec::new();
    collection.retain(|r| {
        if pred(r) {
            removed.push(RecordRef::of(r));
            false
        } else {
            true
        }
    });
    removed
}
