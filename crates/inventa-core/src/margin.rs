//! # Margin Application
//!
//! Derives a sale price from a purchase price and a margin.
//!
//! ## The Two Margin Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Purchase price: 100.00                                                 │
//! │                                                                         │
//! │  { kind: "percentage", value: 30 }   100.00 × (1 + 30/100)  = 130.00   │
//! │  { kind: "fixed",      value: 15 }   100.00 + 15.00         = 115.00   │
//! │  { kind: "fixed",      value: -50 }  100.00 - 50.00 = 50.00 → 100.00   │
//! │                                                      ▲                  │
//! │                                      clamped to the purchase price      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sale price never falls below the purchase price, whatever the sign or
//! size of the margin. A purchase price of zero or less yields `0.00`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::decimal::parse_strict;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Margin Spec
// =============================================================================

/// How much to add on top of the purchase price.
///
/// Serialized as `{ "kind": "percentage", "value": "30" }` or
/// `{ "kind": "fixed", "value": "15.00" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MarginSpec {
    /// Percentage of the purchase price (30 = 30%).
    Percentage(#[ts(type = "string")] Decimal),
    /// Fixed amount added to the purchase price.
    Fixed(#[ts(type = "string")] Money),
}

impl MarginSpec {
    /// A percentage margin.
    #[inline]
    pub const fn percentage(value: Decimal) -> Self {
        MarginSpec::Percentage(value)
    }

    /// A fixed-amount margin.
    #[inline]
    pub const fn fixed(value: Money) -> Self {
        MarginSpec::Fixed(value)
    }

    /// True when the margin would lower the price.
    pub fn is_negative(&self) -> bool {
        match self {
            MarginSpec::Percentage(pct) => pct.is_sign_negative() && !pct.is_zero(),
            MarginSpec::Fixed(amount) => amount.is_negative(),
        }
    }
}

impl Default for MarginSpec {
    fn default() -> Self {
        MarginSpec::Percentage(Decimal::ZERO)
    }
}

impl fmt::Display for MarginSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginSpec::Percentage(pct) => write!(f, "percentage:{}", pct.normalize()),
            MarginSpec::Fixed(amount) => write!(f, "fixed:{}", amount),
        }
    }
}

/// Parses the compact text forms used on the command line and in config:
///
/// | Text              | Margin          |
/// |-------------------|-----------------|
/// | `percentage:30`   | 30%             |
/// | `pct:30`          | 30%             |
/// | `30%`             | 30%             |
/// | `fixed:15`        | 15.00 fixed     |
/// | `15`              | 15.00 fixed     |
impl FromStr for MarginSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: String| ValidationError::InvalidFormat {
            field: "margin".to_string(),
            reason,
        };

        let (kind, value) = match s.split_once(':') {
            Some((kind, value)) => (kind.trim().to_lowercase(), value.trim()),
            None => match s.strip_suffix('%') {
                Some(value) => ("percentage".to_string(), value.trim()),
                None => ("fixed".to_string(), s),
            },
        };

        if value.is_empty() {
            return Err(ValidationError::Required {
                field: "margin".to_string(),
            });
        }

        let number = parse_strict(value).map_err(|e| invalid(format!("'{value}': {e}")))?;

        match kind.as_str() {
            "percentage" | "percent" | "pct" => Ok(MarginSpec::Percentage(number)),
            "fixed" | "amount" => Money::from_decimal(number)
                .map(MarginSpec::Fixed)
                .ok_or_else(|| invalid(format!("'{value}' is out of range"))),
            other => Err(invalid(format!(
                "unknown margin kind '{other}', expected percentage or fixed"
            ))),
        }
    }
}

// =============================================================================
// Sale Price
// =============================================================================

/// Computes the sale price for a purchase price and margin.
///
/// ## Rules
/// - purchase price ≤ 0 → `0.00`, no margin applied
/// - percentage → `purchase × (1 + value / 100)`
/// - fixed → `purchase + value`
/// - result is never below the purchase price
/// - rounded to cents, half away from zero
///
/// ```rust
/// use inventa_core::margin::{compute_sale_price, MarginSpec};
/// use inventa_core::money::Money;
/// use rust_decimal::Decimal;
///
/// let purchase = Money::from_cents(10000);
///
/// let pct = compute_sale_price(purchase, &MarginSpec::percentage(Decimal::from(30)));
/// assert_eq!(pct.to_string(), "130.00");
///
/// let fixed = compute_sale_price(purchase, &MarginSpec::fixed(Money::from_cents(1500)));
/// assert_eq!(fixed.to_string(), "115.00");
/// ```
pub fn compute_sale_price(purchase_price: Money, margin: &MarginSpec) -> Money {
    apply_margin(purchase_price, margin).0
}

/// Same as [`compute_sale_price`], also reporting whether the purchase-price
/// floor had to be enforced.
pub(crate) fn apply_margin(purchase_price: Money, margin: &MarginSpec) -> (Money, bool) {
    if !purchase_price.is_positive() {
        debug!(%purchase_price, "Purchase price not positive, sale price is zero");
        return (Money::zero(), false);
    }

    let raw = raw_sale_price(purchase_price, margin);
    if raw < purchase_price {
        debug!(
            %purchase_price,
            %margin,
            computed = %raw,
            "Sale price below purchase price, clamping to floor"
        );
        return (purchase_price, true);
    }

    (raw, false)
}

/// Sale price before the floor is applied.
fn raw_sale_price(purchase_price: Money, margin: &MarginSpec) -> Money {
    match *margin {
        MarginSpec::Percentage(pct) => {
            let scaled = pct
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|rate| Decimal::ONE.checked_add(rate))
                .and_then(|factor| purchase_price.to_decimal().checked_mul(factor));

            match scaled {
                Some(value) => Money::saturating_from_decimal(value),
                None => {
                    warn!(%purchase_price, %pct, "Percentage margin overflowed, saturating");
                    if pct.is_sign_negative() {
                        Money::MIN
                    } else {
                        Money::MAX
                    }
                }
            }
        }
        MarginSpec::Fixed(amount) => purchase_price + amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: i64) -> MarginSpec {
        MarginSpec::percentage(Decimal::from(value))
    }

    fn fixed(cents: i64) -> MarginSpec {
        MarginSpec::fixed(Money::from_cents(cents))
    }

    #[test]
    fn test_percentage_margin() {
        let sale = compute_sale_price(Money::from_cents(10000), &pct(30));
        assert_eq!(sale.to_string(), "130.00");
    }

    #[test]
    fn test_fixed_margin() {
        let sale = compute_sale_price(Money::from_cents(10000), &fixed(1500));
        assert_eq!(sale.to_string(), "115.00");
    }

    #[test]
    fn test_negative_fixed_margin_is_clamped() {
        let sale = compute_sale_price(Money::from_cents(10000), &fixed(-5000));
        assert_eq!(sale.to_string(), "100.00");
    }

    #[test]
    fn test_negative_percentage_is_clamped() {
        let (sale, clamped) = apply_margin(Money::from_cents(10000), &pct(-20));
        assert_eq!(sale.to_string(), "100.00");
        assert!(clamped);
    }

    #[test]
    fn test_zero_purchase_price_yields_zero() {
        for margin in [pct(30), fixed(1500), fixed(-5000), pct(0)] {
            assert_eq!(compute_sale_price(Money::zero(), &margin).to_string(), "0.00");
        }
    }

    #[test]
    fn test_negative_purchase_price_yields_zero() {
        let sale = compute_sale_price(Money::from_cents(-500), &fixed(10000));
        assert_eq!(sale, Money::zero());
    }

    #[test]
    fn test_percentage_rounding() {
        // 9.99 × 1.125 = 11.23875 → 11.24
        let margin = MarginSpec::percentage(Decimal::new(125, 1));
        let sale = compute_sale_price(Money::from_cents(999), &margin);
        assert_eq!(sale.to_string(), "11.24");

        // 0.10 × 1.05 = 0.105 → 0.11 (half away from zero)
        let sale = compute_sale_price(Money::from_cents(10), &pct(5));
        assert_eq!(sale.to_string(), "0.11");
    }

    #[test]
    fn test_sale_price_never_below_purchase() {
        let purchases = [1, 99, 100, 1234, 10000, 999_999];
        let margins = [
            pct(-100),
            pct(-1),
            pct(0),
            pct(1),
            pct(250),
            fixed(-100_000),
            fixed(-1),
            fixed(0),
            fixed(1),
            fixed(5000),
        ];

        for purchase in purchases.map(Money::from_cents) {
            for margin in &margins {
                let sale = compute_sale_price(purchase, margin);
                assert!(sale >= purchase, "{purchase} with {margin} gave {sale}");
            }
        }
    }

    #[test]
    fn test_huge_values_saturate() {
        let huge = MarginSpec::percentage(Decimal::MAX);
        assert_eq!(compute_sale_price(Money::from_cents(10000), &huge), Money::MAX);
        assert_eq!(compute_sale_price(Money::MAX, &fixed(1)), Money::MAX);
    }

    #[test]
    fn test_parse_margin_text() {
        assert_eq!("percentage:30".parse::<MarginSpec>().unwrap(), pct(30));
        assert_eq!("pct: 12.5".parse::<MarginSpec>().unwrap(), MarginSpec::percentage(Decimal::new(125, 1)));
        assert_eq!("30%".parse::<MarginSpec>().unwrap(), pct(30));
        assert_eq!("fixed:15".parse::<MarginSpec>().unwrap(), fixed(1500));
        assert_eq!("Fixed:-50".parse::<MarginSpec>().unwrap(), fixed(-5000));
        assert_eq!("15.5".parse::<MarginSpec>().unwrap(), fixed(1550));

        assert!("".parse::<MarginSpec>().is_err());
        assert!("percentage:".parse::<MarginSpec>().is_err());
        assert!("markup:10".parse::<MarginSpec>().is_err());
        assert!("fixed:abc".parse::<MarginSpec>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for margin in [pct(30), MarginSpec::percentage(Decimal::new(1250, 2)), fixed(1500), fixed(-99)] {
            assert_eq!(margin.to_string().parse::<MarginSpec>().unwrap(), margin);
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(fixed(1500)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "fixed", "value": "15.00"}));

        let parsed: MarginSpec =
            serde_json::from_str(r#"{"kind":"percentage","value":"30"}"#).unwrap();
        assert_eq!(parsed, pct(30));

        let parsed: MarginSpec = serde_json::from_str(r#"{"kind":"fixed","value":15}"#).unwrap();
        assert_eq!(parsed, fixed(1500));
    }

    #[test]
    fn test_is_negative() {
        assert!(!pct(0).is_negative());
        assert!(!fixed(0).is_negative());
        assert!(pct(-1).is_negative());
        assert!(fixed(-1).is_negative());
    }
}
