use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::totals::DailyTotals;
use crate::Snapshot;

/// Months shown by the income/expense flow chart.
pub const DEFAULT_MONTHS_BACK: u32 = 6;

/// Income and expenses of one calendar month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    /// Short month name, e.g. `Jan`.
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyBucket {
    #[must_use]
    pub fn profit(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Buckets income and expenses by the calendar month of their own date, for
/// the `months_back` months ending with the pivot's month, oldest first.
///
/// Buckets are keyed by `(year, month)`, so the same month of two different
/// years never merges. Records outside the window are ignored.
pub fn monthly_rollup(snapshot: &Snapshot, pivot: NaiveDate, months_back: u32) -> Vec<MonthlyBucket> {
    rollup_from(&DailyTotals::index(snapshot), pivot, months_back)
}

pub(super) fn rollup_from(totals: &DailyTotals, pivot: NaiveDate, months_back: u32) -> Vec<MonthlyBucket> {
    let pivot_index = month_index(pivot.year(), pivot.month());
    let months: Vec<(i32, u32)> = (0..i64::from(months_back))
        .rev()
        .map(|back| from_month_index(pivot_index - back))
        .collect();
    let Some(&(first_year, first_month)) = months.first() else {
        return Vec::new();
    };
    let Some(start) = NaiveDate::from_ymd_opt(first_year, first_month, 1) else {
        return Vec::new();
    };

    let mut buckets: BTreeMap<(i32, u32), MonthlyBucket> = months
        .iter()
        .filter_map(|&(year, month)| {
            let label = NaiveDate::from_ymd_opt(year, month, 1)?.format("%b").to_string();
            Some((
                (year, month),
                MonthlyBucket {
                    year,
                    month,
                    label,
                    income: 0.0,
                    expenses: 0.0,
                },
            ))
        })
        .collect();

    for (date, day) in totals.since(start) {
        // Days after the pivot's month have no bucket.
        if let Some(bucket) = buckets.get_mut(&(date.year(), date.month())) {
            bucket.income += day.income;
            bucket.expenses += day.expenses;
        }
    }

    buckets.into_values().collect()
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

fn from_month_index(index: i64) -> (i32, u32) {
    (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, ExpenseCategory, ExpenseEntry, IncomeEntry, IncomeSource, PaymentMode};

    fn date(s: &str) -> NaiveDate {
        crate::parse_date(s).unwrap()
    }

    fn income(on: &str, amount: f64) -> IncomeEntry {
        IncomeEntry::new(date(on), IncomeSource::RoomRent, Amount::new(amount).unwrap(), None)
    }

    #[test]
    fn window_ends_at_pivot_month_oldest_first() {
        let snapshot = Snapshot::default();
        let buckets = monthly_rollup(&snapshot, date("2025-06-15"), DEFAULT_MONTHS_BACK);

        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert!(buckets.iter().all(|b| b.income == 0.0 && b.expenses == 0.0));
    }

    #[test]
    fn january_inside_window_december_outside() {
        let mut snapshot = Snapshot::default();
        snapshot.income.push(income("2025-01-05", 500.0));
        snapshot.income.push(income("2024-12-01", 700.0));

        let buckets = monthly_rollup(&snapshot, date("2025-06-15"), 6);

        assert_eq!(buckets[0].label, "Jan");
        assert_eq!((buckets[0].year, buckets[0].month), (2025, 1));
        assert_eq!(buckets[0].income, 500.0);
        let total: f64 = buckets.iter().map(|b| b.income).sum();
        assert_eq!(total, 500.0);
    }

    #[test]
    fn window_crosses_year_boundary() {
        let mut snapshot = Snapshot::default();
        snapshot.income.push(income("2024-11-20", 100.0));
        snapshot.expenses.push(ExpenseEntry::new(
            date("2025-02-02"),
            ExpenseCategory::Electricity,
            Amount::new(40.0).unwrap(),
            PaymentMode::Online,
            None,
        ));
        snapshot.income.push(income("2025-03-01", 1.0));

        let buckets = monthly_rollup(&snapshot, date("2025-02-28"), 4);

        let keys: Vec<_> = buckets.iter().map(|b| (b.year, b.month)).collect();
        assert_eq!(keys, [(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);
        assert_eq!(buckets[0].income, 100.0);
        assert_eq!(buckets[3].expenses, 40.0);
        assert_eq!(buckets[3].profit(), -40.0);
    }

    #[test]
    fn same_month_of_another_year_is_not_merged() {
        let mut snapshot = Snapshot::default();
        snapshot.income.push(income("2024-06-10", 300.0));
        snapshot.income.push(income("2025-06-10", 50.0));

        let buckets = monthly_rollup(&snapshot, date("2025-06-30"), 12);

        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "Jul");
        let june = buckets.last().unwrap();
        assert_eq!((june.year, june.month, june.income), (2025, 6, 50.0));
    }

    #[test]
    fn zero_months_is_empty() {
        assert!(monthly_rollup(&Snapshot::default(), date("2025-06-15"), 0).is_empty());
    }
}
