use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::totals::DailyTotals;
use crate::Snapshot;

/// Days shown by the profit trend chart.
pub const DEFAULT_DAYS: u32 = 7;

/// One point of the profit trend.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyProfitPoint {
    /// Short weekday name, e.g. `Mon`.
    pub label: String,
    pub date: NaiveDate,
    pub profit: f64,
}

/// Profit of each of the `days` calendar days ending at `pivot` (inclusive),
/// oldest first. Days without entries are zero.
pub fn rolling_daily_profit(snapshot: &Snapshot, pivot: NaiveDate, days: u32) -> Vec<DailyProfitPoint> {
    profit_from(&DailyTotals::index(snapshot), pivot, days)
}

pub(super) fn profit_from(totals: &DailyTotals, pivot: NaiveDate, days: u32) -> Vec<DailyProfitPoint> {
    (0..u64::from(days))
        .rev()
        .filter_map(|back| pivot.checked_sub_days(Days::new(back)))
        .map(|date| DailyProfitPoint {
            label: date.format("%a").to_string(),
            date,
            profit: totals.day(date).profit(),
        })
        .collect()
}
