//! # Validation Module
//!
//! Input validation for the fields the pricing, conversion and audit forms
//! submit.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                 │
//! │  ├── Debounced input                                                    │
//! │  └── Renders DecimalInputCheck.error next to the field                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Decimal text format (digits, up to 2 decimals)                    │
//! │  ├── Margin sign, unit names, conversion factors                       │
//! │  └── Page sizes and date ranges for audit queries                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing (never fails, clamps instead)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventa_core::validation::{validate_decimal_input, DecimalInputCheck};
//!
//! assert_eq!(validate_decimal_input("12.5").unwrap(), "12.50");
//! assert!(validate_decimal_input("12.345").is_err());
//!
//! let check = DecimalInputCheck::check("abc");
//! assert!(!check.valid);
//! assert!(check.error.is_some());
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::decimal::{format_decimal, parse_strict, DEFAULT_DECIMALS};
use crate::error::ValidationError;
use crate::margin::MarginSpec;
use crate::money::Money;
use crate::{MAX_PAGE_SIZE, MAX_UNIT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Decimal Input
// =============================================================================

/// Validates a user-typed amount.
///
/// ## Rules
/// - Must not be empty
/// - Must not be negative
/// - Must match `digits[.d[d]]` (no sign, no exponent, at most 2 decimals)
/// - Must fit in [`Money`] (up to 92233720368547758.07)
///
/// ## Returns
/// The value reformatted to 2 decimals (`"7.5"` → `"7.50"`).
///
/// ## User Workflow
/// ```text
/// User types "12.5" in "Sale price"
///      │
///      ▼
/// validate_decimal_input("12.5") ← THIS FUNCTION
///      │
///      ├── empty?        → "value is required"
///      ├── negative?     → "value cannot be negative"
///      ├── bad format?   → "value has invalid format: ..." ("12.345")
///      ├── too large?    → "value must be between 0 and ..."
///      │
///      └── OK → "12.50" written back into the field
/// ```
pub fn validate_decimal_input(input: &str) -> ValidationResult<String> {
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "value".to_string(),
        });
    }

    if parse_strict(input).is_ok_and(|value| value.is_sign_negative() && !value.is_zero()) {
        return Err(ValidationError::Negative {
            field: "value".to_string(),
        });
    }

    if !is_plain_amount(input) {
        return Err(ValidationError::InvalidFormat {
            field: "value".to_string(),
            reason: "use digits with up to 2 decimals".to_string(),
        });
    }

    let out_of_range = || ValidationError::OutOfRange {
        field: "value".to_string(),
        min: 0,
        max: Money::MAX.dollars(),
    };

    // Too many digits for Decimal, or more than fits in cents.
    let value = parse_strict(input).map_err(|_| out_of_range())?;
    let amount = Money::from_decimal(value).ok_or_else(out_of_range)?;
    if amount.to_decimal() != value {
        return Err(out_of_range());
    }

    Ok(format_decimal(value, DEFAULT_DECIMALS))
}

/// Matches `^\d+(\.\d{1,2})?$`.
fn is_plain_amount(input: &str) -> bool {
    let (int_part, frac_part) = match input.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (input, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if int_part.is_empty() || !all_digits(int_part) {
        return false;
    }

    match frac_part {
        None => true,
        Some(frac) => (1..=2).contains(&frac.len()) && all_digits(frac),
    }
}

/// Frontend shape of a decimal validation result.
///
/// On success `value` holds the reformatted amount; on failure it echoes the
/// raw input so the field keeps what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DecimalInputCheck {
    pub valid: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl DecimalInputCheck {
    /// Runs [`validate_decimal_input`] and packs the outcome.
    pub fn check(input: &str) -> Self {
        match validate_decimal_input(input) {
            Ok(value) => DecimalInputCheck {
                valid: true,
                value,
                error: None,
            },
            Err(err) => DecimalInputCheck {
                valid: false,
                value: input.to_string(),
                error: Some(err.to_string()),
            },
        }
    }
}

// =============================================================================
// Margins
// =============================================================================

/// Rejects negative margins.
///
/// Pricing itself tolerates them (the result is clamped to the purchase
/// price); this lets a form refuse them before they reach the calculation.
pub fn validate_margin(margin: &MarginSpec) -> ValidationResult<()> {
    if margin.is_negative() {
        return Err(ValidationError::Negative {
            field: "margin".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Conversions
// =============================================================================

/// Validates a unit-of-measure name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_UNIT_NAME_LEN` characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_unit_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    if name.chars().count() > MAX_UNIT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "unit".to_string(),
            max: MAX_UNIT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates how many base units one presentation holds. Must be > 0.
pub fn validate_conversion_factor(factor: Decimal) -> ValidationResult<()> {
    if factor <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "factor".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Audit Queries
// =============================================================================

/// Validates a page size for audit log listings (1 to `MAX_PAGE_SIZE`).
pub fn validate_page_size(page_size: usize) -> ValidationResult<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "page_size".to_string(),
            min: 1,
            max: MAX_PAGE_SIZE as i64,
        });
    }

    Ok(())
}

/// Validates an optional inclusive date range.
pub fn validate_date_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> ValidationResult<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ValidationError::InvalidRange {
                field: "date range".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
