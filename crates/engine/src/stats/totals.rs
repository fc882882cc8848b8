use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::Snapshot;

/// Income and expenses summed over some span of days.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    #[must_use]
    pub fn profit(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Income and expenses indexed by day.
///
/// Built in one pass over the entries so that windowed rollups cost
/// O(records + buckets) instead of filtering every collection per bucket.
#[derive(Clone, Debug, Default)]
pub struct DailyTotals {
    by_day: BTreeMap<NaiveDate, Totals>,
}

impl DailyTotals {
    pub fn index(snapshot: &Snapshot) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
        for entry in &snapshot.income {
            by_day.entry(entry.date).or_default().income += entry.amount.value();
        }
        for entry in &snapshot.expenses {
            by_day.entry(entry.date).or_default().expenses += entry.amount.value();
        }
        Self { by_day }
    }

    /// Totals of one day, zero when nothing was recorded.
    pub fn day(&self, date: NaiveDate) -> Totals {
        self.by_day.get(&date).copied().unwrap_or_default()
    }

    /// Days with at least one entry, from `from` onwards, in date order.
    pub(crate) fn since(&self, from: NaiveDate) -> impl Iterator<Item = (NaiveDate, Totals)> + '_ {
        self.by_day.range(from..).map(|(date, totals)| (*date, *totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, ExpenseCategory, ExpenseEntry, IncomeEntry, IncomeSource, PaymentMode};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn indexes_entries_by_day() {
        let mut snapshot = Snapshot::default();
        for (d, amount) in [(1, 100.0), (2, 50.0), (3, 25.0)] {
            snapshot.income.push(IncomeEntry::new(
                day(d),
                IncomeSource::Restaurant,
                Amount::new(amount).unwrap(),
                None,
            ));
        }
        snapshot.expenses.push(ExpenseEntry::new(
            day(2),
            ExpenseCategory::Food,
            Amount::new(20.0).unwrap(),
            PaymentMode::Cash,
            None,
        ));

        let totals = DailyTotals::index(&snapshot);
        assert_eq!(
            totals.day(day(2)),
            Totals {
                income: 50.0,
                expenses: 20.0
            }
        );
        assert_eq!(totals.day(day(4)), Totals::default());
        assert_eq!(totals.day(day(2)).profit(), 30.0);

        let since: Vec<_> = totals.since(day(2)).map(|(date, _)| date).collect();
        assert_eq!(since, [day(2), day(3)]);
    }
}
