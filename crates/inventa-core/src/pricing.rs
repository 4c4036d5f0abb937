//! # Price Validation
//!
//! Reports how a sale price relates to its purchase price: the margin that
//! was actually applied, the floor a manual price must respect, and whether a
//! manually entered price is acceptable.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product form                                                           │
//! │                                                                         │
//! │  Purchase price (from last purchase)   100.00                           │
//! │  Margin  [percentage ▾] [ 30 ]                                          │
//! │       │                                                                 │
//! │       ▼  PriceDerivation::derive (on every change, debounced by the UI) │
//! │  Sale price                            130.00   (read-only)             │
//! │  Applied margin                         30.00   (30.00%)                │
//! │                                                                         │
//! │  ── or, when the user types a price by hand ──                          │
//! │                                                                         │
//! │  Sale price [ 90.00 ]                                                   │
//! │       │                                                                 │
//! │       ▼  review_sale_price                                              │
//! │  ⚠ "Sale price 90.00 is below the minimum allowed price 100.00"        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here rejects input. A price below cost is a warning the caller
//! may surface or ignore.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::decimal::round_amount;
use crate::margin::{apply_margin, MarginSpec};
use crate::money::Money;

// =============================================================================
// Building Blocks
// =============================================================================

/// The margin actually earned: `max(0, sale - purchase)`.
#[inline]
pub fn compute_applied_margin(purchase_price: Money, sale_price: Money) -> Money {
    (sale_price - purchase_price).max(Money::zero())
}

/// The margin as a percentage of the purchase price, rounded to 2 decimals.
///
/// `max(0, (sale - purchase) / purchase × 100)`, or `0` when the purchase
/// price is not positive.
///
/// ```rust
/// use inventa_core::money::Money;
/// use inventa_core::pricing::compute_applied_percentage;
/// use rust_decimal::Decimal;
///
/// let pct = compute_applied_percentage(Money::from_cents(300), Money::from_cents(400));
/// assert_eq!(pct, Decimal::new(3333, 2)); // 33.33%
/// ```
pub fn compute_applied_percentage(purchase_price: Money, sale_price: Money) -> Decimal {
    if !purchase_price.is_positive() {
        return round_amount(Decimal::ZERO);
    }

    let margin = compute_applied_margin(purchase_price, sale_price);
    let ratio = margin
        .to_decimal()
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(purchase_price.to_decimal()));

    match ratio {
        Some(pct) => round_amount(pct),
        None => Decimal::MAX,
    }
}

/// True iff `sale ≥ purchase`.
#[inline]
pub fn is_sale_price_valid(purchase_price: Money, sale_price: Money) -> bool {
    sale_price >= purchase_price
}

/// The lowest sale price the caller's own validation should accept: the
/// purchase price itself.
#[inline]
pub fn minimum_allowed_price(purchase_price: Money) -> Money {
    purchase_price
}

// =============================================================================
// Price Derivation
// =============================================================================

/// Everything the product form shows after a margin change.
///
/// Ephemeral: built per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceDerivation {
    #[ts(type = "string")]
    pub purchase_price: Money,
    pub margin: MarginSpec,
    #[ts(type = "string")]
    pub sale_price: Money,
    #[ts(type = "string")]
    pub applied_margin: Money,
    #[ts(type = "string")]
    pub applied_percentage: Decimal,
    /// The margin would have put the price below cost and was overridden.
    pub clamped: bool,
}

impl PriceDerivation {
    /// Derives the sale price and the applied margin figures.
    ///
    /// ```rust
    /// use inventa_core::margin::MarginSpec;
    /// use inventa_core::money::Money;
    /// use inventa_core::pricing::PriceDerivation;
    /// use rust_decimal::Decimal;
    ///
    /// let d = PriceDerivation::derive(
    ///     Money::from_cents(10000),
    ///     MarginSpec::percentage(Decimal::from(30)),
    /// );
    /// assert_eq!(d.sale_price.to_string(), "130.00");
    /// assert_eq!(d.applied_margin.to_string(), "30.00");
    /// assert_eq!(d.applied_percentage, Decimal::from(30));
    /// assert!(!d.clamped);
    /// ```
    pub fn derive(purchase_price: Money, margin: MarginSpec) -> Self {
        let (sale_price, clamped) = apply_margin(purchase_price, &margin);

        PriceDerivation {
            purchase_price,
            margin,
            sale_price,
            applied_margin: compute_applied_margin(purchase_price, sale_price),
            applied_percentage: compute_applied_percentage(purchase_price, sale_price),
            clamped,
        }
    }
}

// =============================================================================
// Manual Price Review
// =============================================================================

/// Result of checking a sale price typed in by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalePriceReview {
    #[ts(type = "string")]
    pub purchase_price: Money,
    #[ts(type = "string")]
    pub sale_price: Money,
    #[ts(type = "string")]
    pub minimum_allowed_price: Money,
    pub is_valid: bool,
    #[ts(type = "string")]
    pub applied_margin: Money,
    #[ts(type = "string")]
    pub applied_percentage: Decimal,
    /// Set when the price is below the floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub warning: Option<String>,
}

/// Checks a manually entered sale price against the purchase-price floor.
///
/// A price below the floor is flagged, not rejected.
pub fn review_sale_price(purchase_price: Money, sale_price: Money) -> SalePriceReview {
    let minimum = minimum_allowed_price(purchase_price);
    let is_valid = is_sale_price_valid(purchase_price, sale_price);

    let warning = if is_valid {
        None
    } else {
        debug!(%purchase_price, %sale_price, "Manual sale price below purchase price");
        Some(format!(
            "Sale price {} is below the minimum allowed price {}",
            sale_price, minimum
        ))
    };

    SalePriceReview {
        purchase_price,
        sale_price,
        minimum_allowed_price: minimum,
        is_valid,
        applied_margin: compute_applied_margin(purchase_price, sale_price),
        applied_percentage: compute_applied_percentage(purchase_price, sale_price),
        warning,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
