//! # inventa-core: Pure Business Logic for Inventa
//!
//! The rules the inventory/sales/purchasing frontend relies on, written as
//! pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventa Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Frontend forms / inventa-cli                             │   │
//! │  │   Product form ── Conversions editor ── Audit log page          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ inventa-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │  │ decimal │ │  money  │ │ margin  │ │ pricing  │ │  audit  │ │   │
//! │  │  │ parse/  │ │  cents  │ │ % or    │ │ floor,   │ │ filter, │ │   │
//! │  │  │ format  │ │         │ │ fixed   │ │ applied  │ │ pages,  │ │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ │ csv     │ │   │
//! │  │  ┌────────────┐ ┌────────────┐                    └─────────┘ │   │
//! │  │  │ validation │ │ conversion │                                │   │
//! │  │  └────────────┘ └────────────┘                                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`decimal`] - Lenient/strict decimal parsing, fixed-digit formatting
//! - [`money`] - Money type with integer cents
//! - [`margin`] - Margin specs and sale price computation
//! - [`pricing`] - Applied margin, floor price, manual price review
//! - [`validation`] - Form input validation
//! - [`conversion`] - Unit-of-measure conversion tables
//! - [`audit`] - Audit log filtering, pagination, CSV export
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: CSV is rendered into a `String`, the caller writes it
//! 3. **Integer Money**: amounts are cents; percentages are exact decimals
//! 4. **Pricing never fails**: bad inputs degrade to `0.00` or the floor
//!
//! ## Example Usage
//!
//! ```rust
//! use inventa_core::{Money, MarginSpec, PriceDerivation};
//! use rust_decimal::Decimal;
//!
//! let derivation = PriceDerivation::derive(
//!     Money::from_cents(10000),
//!     MarginSpec::percentage(Decimal::from(30)),
//! );
//!
//! assert_eq!(derivation.sale_price.to_string(), "130.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod conversion;
pub mod decimal;
pub mod error;
pub mod margin;
pub mod money;
pub mod pricing;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use audit::{filter_logs, paginate, to_csv, AuditFilter, AuditLogEntry, Page};
pub use conversion::{Conversion, ConversionTable};
pub use decimal::{format_decimal, parse_decimal, DEFAULT_DECIMALS};
pub use error::{CoreError, CoreResult, ValidationError};
pub use margin::{compute_sale_price, MarginSpec};
pub use money::Money;
pub use pricing::{
    compute_applied_margin, compute_applied_percentage, is_sale_price_valid,
    minimum_allowed_price, review_sale_price, PriceDerivation, SalePriceReview,
};
pub use validation::{validate_decimal_input, DecimalInputCheck};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of audit entries per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page the audit listing will return.
pub const MAX_PAGE_SIZE: usize = 500;

/// Maximum length of a unit-of-measure name.
pub const MAX_UNIT_NAME_LEN: usize = 30;
