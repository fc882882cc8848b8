use chrono::NaiveDate;
use serde::Serialize;

use crate::Snapshot;

/// The four headline figures of one day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`, may be negative.
    pub profit: f64,
    /// `profit / income * 100`, and exactly `0` when there is no income.
    pub margin: f64,
    pub staff_present: usize,
    pub total_staff: usize,
    /// `staff_present / total_staff * 100`, `0` without staff.
    pub attendance_rate: f64,
}

impl DailyMetrics {
    /// Margin rounded to a whole percentage, as shown on the dashboard.
    #[must_use]
    pub fn margin_percent(&self) -> i64 {
        self.margin.round() as i64
    }
}

/// Sums income and expenses dated `date` and counts who was present.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use engine::{Amount, IncomeEntry, IncomeSource, Snapshot, stats};
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let mut snapshot = Snapshot::default();
/// snapshot.income.push(IncomeEntry::new(day, IncomeSource::Other, Amount::new(80.0).unwrap(), None));
///
/// let metrics = stats::daily_metrics(&snapshot, day);
/// assert_eq!(metrics.profit, 80.0);
/// assert_eq!(metrics.margin, 100.0);
/// ```
pub fn daily_metrics(snapshot: &Snapshot, date: NaiveDate) -> DailyMetrics {
    let income: f64 = snapshot
        .income
        .iter()
        .filter(|entry| entry.date == date)
        .map(|entry| entry.amount.value())
        .sum();
    let expenses: f64 = snapshot
        .expenses
        .iter()
        .filter(|entry| entry.date == date)
        .map(|entry| entry.amount.value())
        .sum();
    let staff_present = snapshot
        .attendance
        .iter()
        .filter(|record| record.date == date && record.is_present())
        .count();
    let total_staff = snapshot.staff.len();

    let profit = income - expenses;
    let margin = if income == 0.0 {
        0.0
    } else {
        profit / income * 100.0
    };
    let attendance_rate = if total_staff == 0 {
        0.0
    } else {
        staff_present as f64 / total_staff as f64 * 100.0
    };

    DailyMetrics {
        date,
        income,
        expenses,
        profit,
        margin,
        staff_present,
        total_staff,
        attendance_rate,
    }
}
