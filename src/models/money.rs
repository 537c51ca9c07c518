//! Decimal amounts held as integer cents.

use crate::errors::{AppError, AppResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a user supplied amount such as `12`, `12.5`, `12.50` or `12,50`.
    ///
    /// Negative amounts and more than two decimals are rejected.
    pub fn parse(input: &str) -> AppResult<Self> {
        let raw = input.trim().replace(',', ".");
        let invalid = || AppError::InvalidMoney(input.to_string());

        if raw.is_empty() || raw.starts_with('-') || raw.starts_with('+') {
            return Err(invalid());
        }

        let (units, decimals) = match raw.split_once('.') {
            Some((u, d)) => (u, d),
            None => (raw.as_str(), ""),
        };

        if units.is_empty() && decimals.is_empty() {
            return Err(invalid());
        }
        if decimals.len() > 2
            || !units.chars().all(|c| c.is_ascii_digit())
            || !decimals.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match decimals.len() {
            0 => 0,
            1 => decimals.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => decimals.parse().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|u| u.checked_add(cents))
            .map(Money)
            .ok_or_else(invalid)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Serialized as the same two-decimal string shown on screen ("34.00").
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_inputs() {
        assert_eq!(Money::parse("12").unwrap().cents(), 1200);
        assert_eq!(Money::parse("12.5").unwrap().cents(), 1250);
        assert_eq!(Money::parse("18.50").unwrap().cents(), 1850);
        assert_eq!(Money::parse(" 8,50 ").unwrap().cents(), 850);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "abc", "-3", "1.234", "1.2.3", ".", "12€"] {
            assert!(Money::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn displays_two_decimals() {
        let total: Money = [700, 1850, 850].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.to_string(), "34.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(3400)).unwrap();
        assert_eq!(json, "\"34.00\"");
    }
}
