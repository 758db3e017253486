//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The commerce API is
//! single-currency and never tags its amounts, so [`Money`] carries no
//! currency; [`Currency`] only matters when formatting for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Number of minor units per major unit.
const MINOR_PER_MAJOR: i64 = 100;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    EGP,
    SAR,
    AED,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::EGP => "EGP",
            Currency::SAR => "SAR",
            Currency::AED => "AED",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::EGP => "E\u{00a3}",
            Currency::SAR => "SAR ",
            Currency::AED => "AED ",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "EGP" => Some(Currency::EGP),
            "SAR" => Some(Currency::SAR),
            "AED" => Some(Currency::AED),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount in minor units (e.g., cents).
///
/// Arithmetic saturates instead of overflowing: cart math must never panic
/// on a hostile quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in minor units.
    pub amount_cents: i64,
}

impl Money {
    /// Zero.
    pub const ZERO: Money = Money { amount_cents: 0 };

    /// Create a new Money value from minor units.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * MINOR_PER_MAJOR as f64).round() as i64)
    }

    /// Create an amount from whole major units.
    pub const fn from_major(units: i64) -> Self {
        Self::new(units.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / MINOR_PER_MAJOR as f64
    }

    /// Format with a currency symbol (e.g., "$49.99").
    pub fn display(&self, currency: Currency) -> String {
        format!("{}{}", currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        format!("{}{}.{:02}", sign, abs / per, abs % per)
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }

    /// Multiply by a decimal factor (e.g., for percentages).
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        Money::new((self.amount_cents as f64 * factor).round() as i64)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        self.multiply_decimal(percent / 100.0)
    }

    /// Clamp negative amounts to zero.
    pub fn floor_zero(self) -> Money {
        self.max(Money::ZERO)
    }

    /// `Some(self)` when strictly positive.
    ///
    /// Price fields treat zero the same as absent.
    pub fn positive(self) -> Option<Money> {
        self.is_positive().then_some(self)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
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

/// Error parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount: {0:?}")]
pub struct ParseMoneyError(pub String);

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parse "20", "19.99" or "-3.5".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Money::from_decimal)
            .ok_or_else(|| ParseMoneyError(s.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).amount_cents, 4999);
        assert_eq!(Money::from_decimal(0.1 + 0.2).amount_cents, 30);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999).display(Currency::USD), "$49.99");
        assert_eq!(Money::new(-5).display_amount(), "-0.05");
        assert_eq!(Money::from_major(20).to_string(), "20.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000);
        let b = Money::new(300);
        assert_eq!((a + b).amount_cents, 1300);
        assert_eq!((a - b).amount_cents, 700);
        assert_eq!((a * 3).amount_cents, 3000);
    }

    #[test]
    fn test_money_saturates() {
        let big = Money::new(i64::MAX);
        assert_eq!(big.multiply(2).amount_cents, i64::MAX);
        assert_eq!((big + Money::new(1)).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::from_major(100);
        assert_eq!(m.percentage(10.0), Money::from_major(10));
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [Money::new(100), Money::new(250)].iter().sum();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("19.99".parse::<Money>().unwrap().amount_cents, 1999);
        assert_eq!(" 20 ".parse::<Money>().unwrap().amount_cents, 2000);
        assert!("twenty".parse::<Money>().is_err());
        assert!("NaN".parse::<Money>().is_err());
    }

    #[test]
    fn test_positive_filters_zero() {
        assert_eq!(Money::ZERO.positive(), None);
        assert_eq!(Money::new(-1).positive(), None);
        assert_eq!(Money::new(1).positive(), Some(Money::new(1)));
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("egp"), Some(Currency::EGP));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
