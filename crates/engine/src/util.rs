//! Helpers for record validation and conversion.
//!
//! They centralize validation so every entity enforces the same invariants.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::ValidationError;

/// Wire format of every `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
///
/// ```rust
/// use engine::parse_date;
///
/// assert!(parse_date("2025-01-10").is_ok());
/// assert!(parse_date("2025-02-30").is_err());
/// assert!(parse_date("10/01/2025").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Fresh client-side record id.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn normalize_required_name(
    value: &str,
    label: &'static str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName(label));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
