//! The module contains `SalaryTransaction`, a payment made to a staff member.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, Entity, Snapshot, Table,
    entity::id_equality,
    util::{new_id, normalize_optional_text},
};

/// Whether a payment settles the salary or anticipates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalaryTransactionKind {
    Salary,
    Advance,
}

impl core::fmt::Display for SalaryTransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            SalaryTransactionKind::Salary => "Salary",
            SalaryTransactionKind::Advance => "Advance",
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SalaryTransaction {
    pub id: String,
    pub staff_id: String,
    pub date: NaiveDate,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: SalaryTransactionKind,
    #[serde(default)]
    pub notes: Option<String>,
}

id_equality!(SalaryTransaction);

impl SalaryTransaction {
    pub fn new(
        staff_id: &str,
        date: NaiveDate,
        amount: Amount,
        kind: SalaryTransactionKind,
        notes: Option<&str>,
    ) -> Self {
        Self {
            id: new_id(),
            staff_id: staff_id.to_string(),
            date,
            amount,
            kind,
            notes: normalize_optional_text(notes),
        }
    }
}

impl Entity for SalaryTransaction {
    const TABLE: Table = Table::SalaryTransactions;

    fn id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) {
        self.notes = normalize_optional_text(self.notes.as_deref());
    }

    fn staff_id(&self) -> Option<&str> {
        Some(&self.staff_id)
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.salary_transactions
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.salary_transactions
    }
}
