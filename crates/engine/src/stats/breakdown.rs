use chrono::NaiveDate;
use serde::Serialize;

use crate::{ExpenseCategory, IncomeSource, Snapshot};

/// Total of one category over a date range.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BreakdownLine<K> {
    pub key: K,
    pub total: f64,
}

/// Income per source dated in `from..=to`, one line per source.
pub fn income_by_source(
    snapshot: &Snapshot,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<BreakdownLine<IncomeSource>> {
    IncomeSource::ALL
        .into_iter()
        .map(|source| BreakdownLine {
            key: source,
            total: snapshot
                .income
                .iter()
                .filter(|e| e.source == source && (from..=to).contains(&e.date))
                .map(|e| e.amount.value())
                .sum(),
        })
        .collect()
}

/// Expenses per category dated in `from..=to`, one line per category.
pub fn expenses_by_category(
    snapshot: &Snapshot,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<BreakdownLine<ExpenseCategory>> {
    ExpenseCategory::ALL
        .into_iter()
        .map(|category| BreakdownLine {
            key: category,
            total: snapshot
                .expenses
                .iter()
                .filter(|e| e.category == category && (from..=to).contains(&e.date))
                .map(|e| e.amount.value())
                .sum(),
        })
        .collect()
}
