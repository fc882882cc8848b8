//! Read-side projections over a [`Snapshot`].
//!
//! Every function here is pure: same snapshot and pivot date, same result.
//! Nothing is cached, each call recomputes from the raw entries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::Snapshot;

mod breakdown;
mod daily;
mod monthly;
mod payroll;
mod rolling;
mod totals;

pub use breakdown::{BreakdownLine, expenses_by_category, income_by_source};
pub use daily::{DailyMetrics, daily_metrics};
pub use monthly::{DEFAULT_MONTHS_BACK, MonthlyBucket, monthly_rollup};
pub use payroll::{PayrollSummary, payroll_overview, payroll_summary};
pub use rolling::{DEFAULT_DAYS, DailyProfitPoint, rolling_daily_profit};
pub use totals::{DailyTotals, Totals};

/// What the home screen shows for one pivot date.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub pivot: NaiveDate,
    pub daily: DailyMetrics,
    pub monthly: Vec<MonthlyBucket>,
    pub rolling: Vec<DailyProfitPoint>,
}

/// Computes the daily metrics and both default windows around `pivot`.
pub fn dashboard(snapshot: &Snapshot, pivot: NaiveDate) -> Dashboard {
    let totals = DailyTotals::index(snapshot);
    Dashboard {
        pivot,
        daily: daily_metrics(snapshot, pivot),
        monthly: monthly::rollup_from(&totals, pivot, DEFAULT_MONTHS_BACK),
        rolling: rolling::profit_from(&totals, pivot, DEFAULT_DAYS),
    }
}
