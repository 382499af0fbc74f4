//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    INR,
    MXN,
    NGN,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::CHF => "CHF",
            Currency::INR => "INR",
            Currency::MXN => "MXN",
            Currency::NGN => "NGN",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::CHF => "CHF",
            Currency::INR => "\u{20b9}",
            Currency::MXN => "MX$",
            Currency::NGN => "\u{20a6}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a whole number of major units.
    ///
    /// ```
    /// use atelier_commerce::money::{Money, Currency};
    /// let price = Money::from_major(10, Currency::USD);
    /// assert_eq!(price.amount_cents, 1000);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a Money value from a decimal amount.
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = currency.minor_per_major();
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_magnitude())
    }

    fn display_magnitude(&self) -> String {
        let divisor = self.currency.minor_per_major().unsigned_abs();
        let magnitude = self.amount_cents.unsigned_abs();
        let places = self.currency.decimal_places() as usize;
        if places == 0 {
            return magnitude.to_string();
        }
        format!(
            "{}.{:0places$}",
            magnitude / divisor,
            magnitude % divisor,
            places = places
        )
    }

    /// Multiply by a scalar, clamping at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_from_major() {
        assert_eq!(Money::from_major(10, Currency::USD).amount_cents, 1000);
        assert_eq!(Money::from_major(500, Currency::JPY).amount_cents, 500);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100); // JPY has no decimals
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(-250, Currency::EUR).display(), "-\u{20ac}2.50");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::new(120000, Currency::INR).display(), "\u{20b9}1200.00");
    }

    #[test]
    fn test_saturating_multiply_clamps() {
        let m = Money::new(i64::MAX, Currency::USD);
        assert_eq!(m.saturating_multiply(2).amount_cents, i64::MAX);
        assert_eq!(Money::new(250, Currency::USD).saturating_multiply(3).amount_cents, 750);
    }
}
