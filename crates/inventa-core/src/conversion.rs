//! # Unit Conversions
//!
//! A product is stocked in a base unit (e.g. "unit") and may also be sold in
//! larger presentations ("box" = 12 units, "pack" = 6 units). Each
//! presentation's sale price is derived from the base-unit sale price.
//!
//! ## Table Editing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Base unit: unit        Base sale price: 1.50                           │
//! │                                                                         │
//! │  Unit        Factor     Sale price (derived)                            │
//! │  ─────────   ───────    ────────────────────                            │
//! │  pack          6          9.00   = 1.50 × 6                             │
//! │  box          12         18.00   = 1.50 × 12                            │
//! │                                                                         │
//! │  add / update_factor / rename / remove   → row prices recomputed       │
//! │  set_base_sale_price(2.00)               → every row recomputed        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unit names are unique within a table, compared case-insensitively, and
//! may not repeat the base unit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_conversion_factor, validate_unit_name};

// =============================================================================
// Conversion
// =============================================================================

/// One presentation of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    /// Presentation name ("box").
    pub unit: String,
    /// Base units contained in one of this presentation.
    #[ts(type = "string")]
    pub factor: Decimal,
    /// Derived: base sale price × factor.
    #[ts(type = "string")]
    pub sale_price: Money,
}

impl Conversion {
    fn new(unit: String, factor: Decimal, base_sale_price: Money) -> Self {
        Conversion {
            unit,
            factor,
            sale_price: derive_price(base_sale_price, factor),
        }
    }
}

/// `base × factor`, rounded to cents.
fn derive_price(base_sale_price: Money, factor: Decimal) -> Money {
    match base_sale_price.to_decimal().checked_mul(factor) {
        Some(value) => Money::saturating_from_decimal(value),
        None => Money::MAX,
    }
}

// =============================================================================
// Conversion Table
// =============================================================================

/// The conversions of one product, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConversionTable {
    base_unit: String,
    #[ts(type = "string")]
    base_sale_price: Money,
    conversions: Vec<Conversion>,
}

impl ConversionTable {
    /// Creates an empty table.
    ///
    /// ```rust
    /// use inventa_core::conversion::ConversionTable;
    /// use inventa_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let mut table = ConversionTable::new("unit", Money::from_cents(150)).unwrap();
    /// table.add("box", Decimal::from(12)).unwrap();
    /// assert_eq!(table.get("BOX").unwrap().sale_price.to_string(), "18.00");
    /// ```
    pub fn new(base_unit: &str, base_sale_price: Money) -> CoreResult<Self> {
        Ok(ConversionTable {
            base_unit: validate_unit_name(base_unit)?,
            base_sale_price,
            conversions: Vec::new(),
        })
    }

    pub fn base_unit(&self) -> &str {
        &self.base_unit
    }

    pub fn base_sale_price(&self) -> Money {
        self.base_sale_price
    }

    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    /// Looks a conversion up by unit name (case-insensitive).
    pub fn get(&self, unit: &str) -> Option<&Conversion> {
        self.position(unit).map(|i| &self.conversions[i])
    }

    /// Adds a presentation.
    ///
    /// ## Errors
    /// - invalid unit name or factor ≤ 0 → `Validation`
    /// - unit equal to the base unit or already present → `Duplicate`
    pub fn add(&mut self, unit: &str, factor: Decimal) -> CoreResult<&Conversion> {
        let unit = validate_unit_name(unit)?;
        validate_conversion_factor(factor)?;
        self.ensure_available(&unit, None)?;

        debug!(unit = %unit, %factor, "Adding conversion");
        self.conversions
            .push(Conversion::new(unit, factor, self.base_sale_price));

        let last = self.conversions.len() - 1;
        Ok(&self.conversions[last])
    }

    /// Changes the factor of an existing presentation and re-derives its price.
    pub fn update_factor(&mut self, unit: &str, factor: Decimal) -> CoreResult<&Conversion> {
        validate_conversion_factor(factor)?;
        let index = self.require(unit)?;

        let base = self.base_sale_price;
        let conversion = &mut self.conversions[index];
        conversion.factor = factor;
        conversion.sale_price = derive_price(base, factor);

        Ok(&self.conversions[index])
    }

    /// Renames a presentation, keeping its position and factor.
    pub fn rename(&mut self, unit: &str, new_unit: &str) -> CoreResult<&Conversion> {
        let index = self.require(unit)?;
        let new_unit = validate_unit_name(new_unit)?;
        self.ensure_available(&new_unit, Some(index))?;

        self.conversions[index].unit = new_unit;
        Ok(&self.conversions[index])
    }

    /// Removes a presentation and returns it.
    pub fn remove(&mut self, unit: &str) -> CoreResult<Conversion> {
        let index = self.require(unit)?;
        debug!(unit = %unit, "Removing conversion");
        Ok(self.conversions.remove(index))
    }

    /// Sets a new base-unit price and re-derives every presentation price.
    pub fn set_base_sale_price(&mut self, price: Money) {
        self.base_sale_price = price;
        for conversion in &mut self.conversions {
            conversion.sale_price = derive_price(price, conversion.factor);
        }
    }

    /// Factor of `unit` relative to the base unit; the base unit itself is 1.
    fn factor_of(&self, unit: &str) -> CoreResult<Decimal> {
        if same_unit(unit, &self.base_unit) {
            return Ok(Decimal::ONE);
        }

        self.get(unit)
            .map(|c| c.factor)
            .ok_or_else(|| CoreError::ConversionNotFound(unit.trim().to_string()))
    }

    /// How many base units `quantity` of `unit` amounts to.
    pub fn to_base_quantity(&self, unit: &str, quantity: Decimal) -> CoreResult<Decimal> {
        let factor = self.factor_of(unit)?;
        quantity.checked_mul(factor).ok_or_else(|| {
            CoreError::Validation(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: i64::MAX,
            })
        })
    }

    /// Price of `quantity` of `unit`: `unit sale price × quantity`.
    pub fn price_for(&self, unit: &str, quantity: Decimal) -> CoreResult<Money> {
        let unit_price = if same_unit(unit, &self.base_unit) {
            self.base_sale_price
        } else {
            self.get(unit)
                .map(|c| c.sale_price)
                .ok_or_else(|| CoreError::ConversionNotFound(unit.trim().to_string()))?
        };

        Ok(derive_price(unit_price, quantity))
    }

    fn position(&self, unit: &str) -> Option<usize> {
        self.conversions.iter().position(|c| same_unit(&c.unit, unit))
    }

    fn require(&self, unit: &str) -> CoreResult<usize> {
        self.position(unit)
            .ok_or_else(|| CoreError::ConversionNotFound(unit.trim().to_string()))
    }

    /// Fails when `unit` is the base unit or used by a row other than `skip`.
    fn ensure_available(&self, unit: &str, skip: Option<usize>) -> CoreResult<()> {
        let taken_by_row = self
            .position(unit)
            .is_some_and(|index| Some(index) != skip);

        if same_unit(unit, &self.base_unit) || taken_by_row {
            return Err(ValidationError::Duplicate {
                field: "unit".to_string(),
                value: unit.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn same_unit(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ConversionTable {
        let mut table = ConversionTable::new("unit", Money::from_cents(150)).unwrap();
        table.add("pack", Decimal::from(6)).unwrap();
        table.add("box", Decimal::from(12)).unwrap();
        table
    }

    #[test]
    fn test_add_derives_price() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("pack").unwrap().sale_price, Money::from_cents(900));
        assert_eq!(table.get("box").unwrap().sale_price, Money::from_cents(1800));
    }

    #[test]
    fn test_fractional_factor_rounds() {
        let mut table = ConversionTable::new("kg", Money::from_cents(333)).unwrap();
        let half = table.add("half kg", Decimal::new(5, 1)).unwrap();
        // 3.33 × 0.5 = 1.665 → 1.67
        assert_eq!(half.sale_price.to_string(), "1.67");
    }

    #[test]
    fn test_keeps_insertion_order() {
        let units: Vec<_> = table().conversions().iter().map(|c| c.unit.clone()).collect();
        assert_eq!(units, vec!["pack", "box"]);
    }

    #[test]
    fn test_rejects_duplicates_and_base_unit() {
        let mut table = table();
        assert!(matches!(
            table.add("BOX", Decimal::from(24)),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert!(matches!(
            table.add(" Unit ", Decimal::from(2)),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut table = table();
        assert!(table.add("", Decimal::from(2)).is_err());
        assert!(table.add("crate", Decimal::ZERO).is_err());
        assert!(table.add("crate", Decimal::from(-3)).is_err());
        assert!(ConversionTable::new("  ", Money::zero()).is_err());
    }

    #[test]
    fn test_update_factor() {
        let mut table = table();
        let updated = table.update_factor("box", Decimal::from(10)).unwrap();
        assert_eq!(updated.sale_price, Money::from_cents(1500));

        assert!(matches!(
            table.update_factor("crate", Decimal::from(10)),
            Err(CoreError::ConversionNotFound(_))
        ));
        assert!(table.update_factor("box", Decimal::ZERO).is_err());
    }

    #[test]
    fn test_rename() {
        let mut table = table();
        table.rename("pack", "six-pack").unwrap();
        assert!(table.get("pack").is_none());
        assert_eq!(table.get("six-pack").unwrap().factor, Decimal::from(6));

        // renaming to its own name with different case is fine
        table.rename("box", "Box").unwrap();
        assert_eq!(table.conversions()[1].unit, "Box");

        assert!(table.rename("Box", "six-pack").is_err());
        assert!(table.rename("Box", "unit").is_err());
    }

    #[test]
    fn test_remove() {
        let mut table = table();
        let removed = table.remove("PACK").unwrap();
        assert_eq!(removed.unit, "pack");
        assert_eq!(table.len(), 1);
        assert!(matches!(table.remove("pack"), Err(CoreError::ConversionNotFound(_))));
    }

    #[test]
    fn test_base_price_change_recomputes_rows() {
        let mut table = table();
        table.set_base_sale_price(Money::from_cents(200));
        assert_eq!(table.base_sale_price(), Money::from_cents(200));
        assert_eq!(table.get("pack").unwrap().sale_price, Money::from_cents(1200));
        assert_eq!(table.get("box").unwrap().sale_price, Money::from_cents(2400));
    }

    #[test]
    fn test_quantities_and_prices() {
        let table = table();
        assert_eq!(table.to_base_quantity("box", Decimal::from(3)).unwrap(), Decimal::from(36));
        assert_eq!(table.to_base_quantity("unit", Decimal::from(5)).unwrap(), Decimal::from(5));
        assert_eq!(table.price_for("box", Decimal::from(2)).unwrap(), Money::from_cents(3600));
        assert_eq!(table.price_for("unit", Decimal::from(4)).unwrap(), Money::from_cents(600));
        assert!(table.price_for("crate", Decimal::ONE).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(table()).unwrap();
        assert_eq!(json["baseUnit"], "unit");
        assert_eq!(json["baseSalePrice"], "1.50");
        assert_eq!(json["conversions"][1]["unit"], "box");
        assert_eq!(json["conversions"][1]["salePrice"], "18.00");
    }
}
