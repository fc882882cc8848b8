use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{AttendanceStatus, SalaryTransactionKind, Snapshot, StaffMember};

/// Pay situation of one staff member over one calendar month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PayrollSummary {
    pub staff_id: String,
    pub name: String,
    pub year: i32,
    pub month: u32,
    pub monthly_salary: f64,
    pub days_present: usize,
    pub days_absent: usize,
    pub salary_paid: f64,
    pub advances: f64,
}

impl PayrollSummary {
    #[must_use]
    pub fn total_paid(&self) -> f64 {
        self.salary_paid + self.advances
    }

    /// What is still owed for the month; negative when overpaid.
    #[must_use]
    pub fn balance_due(&self) -> f64 {
        self.monthly_salary - self.total_paid()
    }
}

/// Attendance and payments of `staff_id` dated in `year`/`month`.
///
/// Returns `None` when the staff member does not exist.
pub fn payroll_summary(
    snapshot: &Snapshot,
    staff_id: &str,
    year: i32,
    month: u32,
) -> Option<PayrollSummary> {
    snapshot
        .staff_member(staff_id)
        .map(|member| summarize(snapshot, member, year, month))
}

/// One summary per staff member for the pivot's month, in staff order.
pub fn payroll_overview(snapshot: &Snapshot, pivot: NaiveDate) -> Vec<PayrollSummary> {
    snapshot
        .staff
        .iter()
        .map(|member| summarize(snapshot, member, pivot.year(), pivot.month()))
        .collect()
}

fn summarize(snapshot: &Snapshot, member: &StaffMember, year: i32, month: u32) -> PayrollSummary {
    let in_month = |date: NaiveDate| date.year() == year && date.month() == month;

    let mut summary = PayrollSummary {
        staff_id: member.id.clone(),
        name: member.name.clone(),
        year,
        month,
        monthly_salary: member.monthly_salary.value(),
        days_present: 0,
        days_absent: 0,
        salary_paid: 0.0,
        advances: 0.0,
    };

    for record in snapshot.attendance_of(&member.id).filter(|r| in_month(r.date)) {
        match record.status {
            AttendanceStatus::Present => summary.days_present += 1,
            AttendanceStatus::Absent => summary.days_absent += 1,
        }
    }

    for tx in snapshot
        .salary_transactions_of(&member.id)
        .filter(|tx| in_month(tx.date))
    {
        match tx.kind {
            SalaryTransactionKind::Salary => summary.salary_paid += tx.amount.value(),
            SalaryTransactionKind::Advance => summary.advances += tx.amount.value(),
        }
    }

    summary
}
