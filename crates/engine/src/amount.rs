//! The module contains `Amount`, the monetary value of every record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Non-negative monetary amount.
///
/// Stored as the plain number the remote tables use (`NUMERIC` columns), but
/// it can only be built through [`Amount::new`] or deserialization, so every amount in
/// the engine is finite and `>= 0`. Signed values (profit, balance due) are
/// plain `f64` results of the aggregation functions.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::new(12.5).unwrap();
/// assert_eq!(amount.value(), 12.5);
/// assert_eq!(amount.to_string(), "12.50");
///
/// assert!(Amount::new(f64::NAN).is_err());
/// assert!(Amount::new(-1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Creates a new amount, rejecting NaN, infinities and negative values.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteAmount(value));
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeAmount(value));
        }
        // Normalize -0.0.
        Ok(Self(value + 0.0))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::ZERO.to_string(), "0.00");
        assert_eq!(Amount::new(0.1).unwrap().to_string(), "0.10");
        assert_eq!(Amount::new(1050.0).unwrap().to_string(), "1050.00");
    }

    #[test]
    fn new_rejects_non_finite_and_negative() {
        assert!(matches!(
            Amount::new(f64::INFINITY),
            Err(ValidationError::NonFiniteAmount(_))
        ));
        assert!(matches!(
            Amount::new(f64::NAN),
            Err(ValidationError::NonFiniteAmount(_))
        ));
        assert_eq!(
            Amount::new(-0.01),
            Err(ValidationError::NegativeAmount(-0.01))
        );
        assert_eq!(Amount::new(-0.0).unwrap().value().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn deserialize_validates() {
        let ok: Amount = serde_json::from_str("1000").unwrap();
        assert_eq!(ok.value(), 1000.0);
        assert!(serde_json::from_str::<Amount>("-3").is_err());
    }
}
