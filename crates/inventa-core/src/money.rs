//! # Money Module
//!
//! Provides the `Money` type: a monetary amount with exactly two fractional
//! digits.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    100 * 1.15 = 114.99999999999999  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + exact decimals                           │
//! │    Prices are stored as i64 cents.                                      │
//! │    Percentages and factors are rust_decimal values.                     │
//! │    Results are rounded back to cents exactly once, half away from 0.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Text Form
//! Every `Money` renders as a plain two-decimal string (`"130.00"`), which
//! is also its serialized form. The frontend adds currency symbols through
//! [`Money::format_with_symbol`].
//!
//! ```rust
//! use inventa_core::money::Money;
//!
//! let price = Money::from_cents(13000);
//! assert_eq!(price.to_string(), "130.00");
//! assert_eq!(price.format_with_symbol("$"), "$130.00");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

use crate::decimal::parse_strict;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a fixed margin typed as `-50` must be representable
///   so the pricing rules can clamp it away
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as text**: `"115.00"`, never as a float
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// The largest representable amount. Overflowing arithmetic saturates here.
    pub const MAX: Money = Money(i64::MAX);

    /// The smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use inventa_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an exact decimal to Money, rounding half away from zero.
    ///
    /// Returns `None` when the value does not fit in i64 cents.
    ///
    /// ```rust
    /// use inventa_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let d = Decimal::new(1_2345, 3); // 12.345
    /// assert_eq!(Money::from_decimal(d), Some(Money::from_cents(1235)));
    /// ```
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Like [`Money::from_decimal`] but clamps out-of-range values to
    /// [`Money::MAX`] / [`Money::MIN`].
    pub fn saturating_from_decimal(value: Decimal) -> Self {
        match Money::from_decimal(value) {
            Some(money) => money,
            None => {
                tracing::warn!(%value, "Amount out of range, saturating");
                if value.is_sign_negative() {
                    Money::MIN
                } else {
                    Money::MAX
                }
            }
        }
    }

    /// Returns the amount as an exact decimal with scale 2.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats the amount with a currency symbol in front: `-$5.50`.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal text form, e.g. `130.00` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(""))
    }
}

/// Strict parse of a two-decimal amount (`"12"`, `"12.5"`, `"-3.25"`).
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_strict(s)?;
        Money::from_decimal(value).ok_or(rust_decimal::Error::ExceedsMaximumPossibleValue)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepted wire forms: `"12.50"`, `12.5`, `12`.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = match MoneyRepr::deserialize(deserializer)? {
            MoneyRepr::Int(major) => Decimal::from(major),
            MoneyRepr::Float(f) => Decimal::from_f64(f)
                .ok_or_else(|| D::Error::custom(format!("invalid amount: {f}")))?,
            MoneyRepr::Text(s) => {
                parse_strict(&s).map_err(|e| D::Error::custom(format!("invalid amount '{s}': {e}")))?
            }
        };

        Money::from_decimal(value).ok_or_else(|| D::Error::custom("amount out of range"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
