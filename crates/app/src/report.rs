//! Plain text rendering of the dashboard.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use engine::{Snapshot, stats};

use crate::settings::Report;

pub struct ReportView<'a> {
    snapshot: &'a Snapshot,
    pivot: NaiveDate,
    months: u32,
    days: u32,
}

impl<'a> ReportView<'a> {
    pub fn new(snapshot: &'a Snapshot, pivot: NaiveDate, report: &Report) -> Self {
        Self {
            snapshot,
            pivot,
            months: report.months,
            days: report.days,
        }
    }

    fn month_start(&self) -> NaiveDate {
        self.pivot.with_day(1).unwrap_or(self.pivot)
    }
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let daily = stats::daily_metrics(self.snapshot, self.pivot);
        writeln!(f, "HotelPro, {}", self.pivot.format("%A %d %B %Y"))?;
        writeln!(f, "  {:<16}{:>12.2}", "Income", daily.income)?;
        writeln!(f, "  {:<16}{:>12.2}", "Expenses", daily.expenses)?;
        writeln!(f, "  {:<16}{:>12.2}", "Profit", daily.profit)?;
        writeln!(f, "  {:<16}{:>11}%", "Margin", daily.margin_percent())?;
        writeln!(
            f,
            "  {:<16}{:>12}",
            "Staff present",
            format!(
                "{}/{} ({:.0}%)",
                daily.staff_present, daily.total_staff, daily.attendance_rate
            )
        )?;

        writeln!(f)?;
        writeln!(f, "Last {} months", self.months)?;
        for bucket in stats::monthly_rollup(self.snapshot, self.pivot, self.months) {
            writeln!(
                f,
                "  {} {}  income {:>10.2}  expenses {:>10.2}  profit {:>10.2}",
                bucket.label,
                bucket.year,
                bucket.income,
                bucket.expenses,
                bucket.profit()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Daily profit, last {} days", self.days)?;
        for point in stats::rolling_daily_profit(self.snapshot, self.pivot, self.days) {
            writeln!(f, "  {} {}  {:>10.2}", point.label, point.date, point.profit)?;
        }

        let from = self.month_start();
        writeln!(f)?;
        writeln!(f, "Income by source, {} to {}", from, self.pivot)?;
        for line in stats::income_by_source(self.snapshot, from, self.pivot) {
            writeln!(f, "  {:<16}{:>12.2}", line.key.to_string(), line.total)?;
        }
        writeln!(f, "Expenses by category, {} to {}", from, self.pivot)?;
        for line in stats::expenses_by_category(self.snapshot, from, self.pivot) {
            writeln!(f, "  {:<16}{:>12.2}", line.key.to_string(), line.total)?;
        }

        let payroll = stats::payroll_overview(self.snapshot, self.pivot);
        if !payroll.is_empty() {
            writeln!(f)?;
            writeln!(f, "Payroll, {}", self.pivot.format("%B %Y"))?;
            for summary in payroll {
                writeln!(
                    f,
                    "  {:<16} present {:>2}  absent {:>2}  paid {:>10.2}  due {:>10.2}",
                    summary.name,
                    summary.days_present,
                    summary.days_absent,
                    summary.total_paid(),
                    summary.balance_due()
                )?;
            }
        }
        Ok(())
    }
}
