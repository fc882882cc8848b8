//! Remote table names. A [`Table`] also identifies the kind of entity it holds.

use serde::{Deserialize, Serialize};

/// One of the five tables mirrored by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Income,
    Expenses,
    Staff,
    Attendance,
    SalaryTransactions,
}

impl Table {
    /// Every table, in load order.
    pub const ALL: [Table; 5] = [
        Table::Income,
        Table::Expenses,
        Table::Staff,
        Table::Attendance,
        Table::SalaryTransactions,
    ];

    /// Name of the table on the remote side.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Table::Income => "income",
            Table::Expenses => "expenses",
            Table::Staff => "staff",
            Table::Attendance => "attendance",
            Table::SalaryTransactions => "salary_transactions",
        }
    }
}

impl core::fmt::Display for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_wire_contract() {
        let names: Vec<_> = Table::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            ["income", "expenses", "staff", "attendance", "salary_transactions"]
        );
        assert_eq!(Table::SalaryTransactions.to_string(), "salary_transactions");
    }
}
