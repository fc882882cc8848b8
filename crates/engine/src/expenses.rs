//! The module contains `ExpenseEntry`, its category and payment mode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, Entity, Snapshot, Table,
    entity::id_equality,
    util::{new_id, normalize_optional_text},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Groceries", alias = "Food")]
    Food,
    #[serde(rename = "Electricity Bill", alias = "Electricity")]
    Electricity,
    Maintenance,
    #[serde(rename = "Staff Salary", alias = "Salary")]
    Salary,
    Miscellaneous,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Food,
        ExpenseCategory::Electricity,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Salary,
        ExpenseCategory::Miscellaneous,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food & Groceries",
            ExpenseCategory::Electricity => "Electricity Bill",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Salary => "Staff Salary",
            ExpenseCategory::Miscellaneous => "Miscellaneous",
        }
    }
}

impl core::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    Cash,
    Online,
}

impl core::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Online => "Online",
        })
    }
}

/// Money spent on a given day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: Amount,
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub notes: Option<String>,
}

id_equality!(ExpenseEntry);

impl ExpenseEntry {
    pub fn new(
        date: NaiveDate,
        category: ExpenseCategory,
        amount: Amount,
        payment_mode: PaymentMode,
        notes: Option<&str>,
    ) -> Self {
        Self {
            id: new_id(),
            date,
            category,
            amount,
            payment_mode,
            notes: normalize_optional_text(notes),
        }
    }
}

impl Entity for ExpenseEntry {
    const TABLE: Table = Table::Expenses;

    fn id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) {
        self.notes = normalize_optional_text(self.notes.as_deref());
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.expenses
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.expenses
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn category_accepts_label_and_variant_name() {
        let by_label: ExpenseCategory = serde_json::from_value(json!("Electricity Bill")).unwrap();
        let by_name: ExpenseCategory = serde_json::from_value(json!("Electricity")).unwrap();
        assert_eq!(by_label, ExpenseCategory::Electricity);
        assert_eq!(by_name, ExpenseCategory::Electricity);
        assert_eq!(
            serde_json::to_value(ExpenseCategory::Food).unwrap(),
            json!("Food & Groceries")
        );
    }

    #[test]
    fn row_uses_snake_case_payment_mode() {
        let expense = ExpenseEntry::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            ExpenseCategory::Maintenance,
            Amount::new(400.0).unwrap(),
            PaymentMode::Online,
            None,
        );

        let row = expense.to_row().unwrap();
        assert_eq!(row["payment_mode"], "Online");
        assert_eq!(row["category"], "Maintenance");
        assert_eq!(row["notes"], serde_json::Value::Null);
    }

    #[test]
    fn blank_notes_in_row_decode_as_none() {
        let row = json!({
            "id": "exp-1",
            "date": "2025-01-10",
            "category": "Miscellaneous",
            "amount": 120,
            "payment_mode": "Cash",
            "notes": "  "
        });

        let expense = ExpenseEntry::from_row(row).unwrap();
        assert!(expense.notes.is_none());
    }
}
