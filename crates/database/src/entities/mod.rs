//! sea-orm entities of the five ledger tables.
//!
//! Column names match the wire rows of the engine, so a `Model` serializes to
//! the same JSON object a remote row carries.

pub mod attendance;
pub mod expenses;
pub mod income;
pub mod salary_transactions;
pub mod staff;

use chrono::NaiveDate;
use engine::DATE_FORMAT;

pub(crate) fn date_column(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
