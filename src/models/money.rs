//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so sums are exact. On the wire an
//! amount is a plain JSON number with at most two fractional digits
//! (`1000`, `12.5`, `12.34`).

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Smallest amount a transaction or budget may carry
    pub const MIN_AMOUNT: Money = Money(1);

    /// Largest amount a transaction or budget may carry
    pub const MAX_AMOUNT: Money = Money(10_000_000 * 100);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finance_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Round a floating point amount to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values that do not fit.
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether this amount is allowed on a transaction or budget
    pub fn is_valid_amount(&self) -> bool {
        (Self::MIN_AMOUNT..=Self::MAX_AMOUNT).contains(self)
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "₹10.50", "$1,250", "10". Anything past the
    /// second fractional digit is rounded to the nearest cent.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.trim_start_matches(&['₹', '$'][..]);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty()
            || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.')
            || cleaned.matches('.').count() > 1
        {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value: f64 = cleaned
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        let money = Self::from_f64(value).ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;

        Ok(if negative { -money } else { money })
    }

    /// Shortest decimal form, without trailing zeros ("1000", "12.5", "12.34")
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let units = self.units().abs();
        let cents = self.cents_part();
        if cents == 0 {
            format!("{}{}", sign, units)
        } else if cents % 10 == 0 {
            format!("{}{}.{}", sign, units, cents / 10)
        } else {
            format!("{}{}.{:02}", sign, units, cents)
        }
    }

    /// Format with a currency symbol and exactly two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.cents_part() == 0 {
            serializer.serialize_i64(self.units())
        } else {
            serializer.serialize_f64(self.to_f64())
        }
    }
}

/// Amounts have been stored both as numbers and as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(n) => Money::from_f64(n)
                .ok_or_else(|| de::Error::custom(format!("amount out of range: {}", n))),
            RawAmount::Text(s) => Money::parse(&s).map_err(de::Error::custom),
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_f64_rounds_to_cents() {
        assert_eq!(Money::from_f64(0.29).unwrap().cents(), 29);
        assert_eq!(Money::from_f64(10.256).unwrap().cents(), 1026);
        assert_eq!(Money::from_f64(1000.0).unwrap().cents(), 100_000);
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).format_with_symbol("₹"), "₹0.05");
        assert_eq!(Money::from_cents(-70000).format_with_symbol("₹"), "-₹700.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_units(1000).to_plain_string(), "1000");
        assert_eq!(Money::from_cents(1250).to_plain_string(), "12.5");
        assert_eq!(Money::from_cents(1234).to_plain_string(), "12.34");
        assert_eq!(Money::from_cents(5).to_plain_string(), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!(huge + Money::from_cents(1), huge);
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));

        let mut total = huge;
        total += huge;
        assert_eq!(total, huge);
        assert_eq!(-Money::from_cents(i64::MIN), huge);

        let sum: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(sum, huge);
    }

    #[test]
    fn test_valid_amount_range() {
        assert!(Money::from_cents(1).is_valid_amount());
        assert!(Money::from_units(10_000_000).is_valid_amount());
        assert!(!Money::zero().is_valid_amount());
        assert!(!Money::from_cents(-500).is_valid_amount());
        assert!(!Money::from_cents(1_000_000_001).is_valid_amount());
        assert!(!Money::from_f64(5e16).unwrap().is_valid_amount());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$1,250").unwrap().cents(), 125_000);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.005").unwrap().cents(), 1);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization_matches_plain_numbers() {
        assert_eq!(serde_json::to_string(&Money::from_units(1000)).unwrap(), "1000");
        assert_eq!(serde_json::to_string(&Money::from_cents(1234)).unwrap(), "12.34");

        let from_number: Money = serde_json::from_str("12.34").unwrap();
        assert_eq!(from_number.cents(), 1234);

        let from_string: Money = serde_json::from_str("\"250\"").unwrap();
        assert_eq!(from_string.cents(), 25_000);
    }
}
