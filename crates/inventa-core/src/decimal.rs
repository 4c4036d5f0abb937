//! # Decimal Parsing/Formatting
//!
//! Converts user-facing decimal text to exact numeric values and back.
//!
//! ## Two Parsers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parse_decimal (lenient)                parse_strict (exact)            │
//! │  ───────────────────────                ────────────────────            │
//! │  "12.5kg"  → 12.5                       "12.5kg" → Err                  │
//! │  ""        → 0                          ""       → Err                  │
//! │  "abc"     → 0                          "abc"    → Err                  │
//! │  NaN (f64) → 0                                                          │
//! │                                                                         │
//! │  Used while the user is typing.         Used for config, CLI args and   │
//! │  Never fails.                           deserialized amounts.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding is always half away from zero (`0.125 → 0.13`).

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

use crate::money::Money;

/// Fractional digits used for every amount shown to the user.
pub const DEFAULT_DECIMALS: u32 = 2;

/// rust_decimal cannot represent more fractional digits than this.
const MAX_SCALE: u32 = 28;

// =============================================================================
// Input Sources
// =============================================================================

/// Anything a form field may hand to [`parse_decimal`]: text, numbers,
/// already-parsed decimals, or a missing value.
pub trait DecimalSource {
    /// Returns the exact value, or `None` when there is nothing usable.
    fn to_decimal(&self) -> Option<Decimal>;
}

impl DecimalSource for str {
    fn to_decimal(&self) -> Option<Decimal> {
        leading_number(self).and_then(|text| parse_strict(&text).ok())
    }
}

impl DecimalSource for String {
    fn to_decimal(&self) -> Option<Decimal> {
        self.as_str().to_decimal()
    }
}

impl DecimalSource for f64 {
    fn to_decimal(&self) -> Option<Decimal> {
        if self.is_finite() {
            Decimal::from_f64(*self)
        } else {
            None
        }
    }
}

impl DecimalSource for i64 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl DecimalSource for i32 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl DecimalSource for Decimal {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl DecimalSource for Money {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Money::to_decimal(self))
    }
}

impl<T: DecimalSource> DecimalSource for Option<T> {
    fn to_decimal(&self) -> Option<Decimal> {
        self.as_ref().and_then(DecimalSource::to_decimal)
    }
}

impl<T: DecimalSource + ?Sized> DecimalSource for &T {
    fn to_decimal(&self) -> Option<Decimal> {
        (**self).to_decimal()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal leniently. Returns `0` for empty, missing or
/// unparseable input; never fails.
///
/// Text is read like a float parser would: leading whitespace is skipped and
/// the longest numeric prefix is used.
///
/// ```rust
/// use inventa_core::decimal::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal("12.50"), Decimal::new(1250, 2));
/// assert_eq!(parse_decimal("  7kg"), Decimal::from(7));
/// assert_eq!(parse_decimal("abc"), Decimal::ZERO);
/// assert_eq!(parse_decimal(None::<&str>), Decimal::ZERO);
/// assert_eq!(parse_decimal(f64::NAN), Decimal::ZERO);
/// ```
pub fn parse_decimal(input: impl DecimalSource) -> Decimal {
    match input.to_decimal() {
        Some(value) => value,
        None => {
            tracing::trace!("Unparseable decimal input, using 0");
            Decimal::ZERO
        }
    }
}

/// Parses a complete decimal string (surrounding whitespace allowed).
///
/// Scientific notation (`1.5e3`) is accepted.
pub fn parse_strict(input: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = input.trim();
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str(text)
    }
}

/// Extracts the longest prefix of `input` (after leading whitespace) that
/// reads as `[+-]digits[.digits][e[+-]digits]` and normalizes it for
/// rust_decimal (`".5"` becomes `"0.5"`, `"5."` becomes `"5"`).
///
/// At least one mantissa digit is required.
fn leading_number(input: &str) -> Option<String> {
    let bytes = input.trim_start().as_bytes();
    let mut pos = 0;
    let mut out = String::new();

    match bytes.first() {
        Some(b'-') => {
            out.push('-');
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_digits = &bytes[int_start..pos];

    let mut frac_digits: &[u8] = &[];
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        frac_digits = &bytes[frac_start..frac_end];
        pos = frac_end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    if int_digits.is_empty() {
        out.push('0');
    } else {
        out.extend(int_digits.iter().map(|&b| b as char));
    }
    if !frac_digits.is_empty() {
        out.push('.');
        out.extend(frac_digits.iter().map(|&b| b as char));
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_end = pos + 1;
        let sign = match bytes.get(exp_end) {
            Some(&b) if b == b'+' || b == b'-' => {
                exp_end += 1;
                Some(b as char)
            }
            _ => None,
        };
        let exp_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_start {
            out.push('e');
            out.extend(sign.filter(|&c| c == '-'));
            out.extend(bytes[exp_start..exp_end].iter().map(|&b| b as char));
        }
    }

    Some(out)
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders `value` with exactly `decimals` fractional digits, rounding half
/// away from zero.
///
/// ```rust
/// use inventa_core::decimal::format_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_decimal(Decimal::new(130, 0), 2), "130.00");
/// assert_eq!(format_decimal(Decimal::new(125, 3), 2), "0.13");
/// assert_eq!(format_decimal(Decimal::new(-4, 3), 2), "0.00");
/// ```
pub fn format_decimal(value: Decimal, decimals: u32) -> String {
    let decimals = decimals.min(MAX_SCALE);
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Rounds to [`DEFAULT_DECIMALS`] places, half away from zero, and fixes the
/// scale so the value always prints with two decimals (`15` → `15.00`).
pub fn round_amount(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DEFAULT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DEFAULT_DECIMALS);
    rounded
}

// =============================================================================
// Unit Tests
// =============================================================================
