//! `inventa conversions`: derived prices for each presentation of a product.

use std::io::Write;

use inventa_core::ConversionTable;

use super::Output;
use crate::cli::ConversionsArgs;
use crate::error::CliResult;

pub fn execute<W: Write>(args: &ConversionsArgs, output: Output<'_>, out: &mut W) -> CliResult<u8> {
    let mut table = ConversionTable::new(&args.base_unit, args.base_price)?;
    for unit in &args.units {
        table.add(&unit.name, unit.factor)?;
    }

    if output.json {
        output.write_json(out, &table)?;
        return Ok(0);
    }

    writeln!(
        out,
        "Base unit: {} at {}",
        table.base_unit(),
        output.money(table.base_sale_price())
    )?;

    if table.is_empty() {
        writeln!(out, "No conversions")?;
        return Ok(0);
    }

    writeln!(out, "{:<20} {:>10} {:>14}", "UNIT", "FACTOR", "SALE PRICE")?;
    for conversion in table.conversions() {
        writeln!(
            out,
            "{:<20} {:>10} {:>14}",
            conversion.unit,
            conversion.factor.normalize().to_string(),
            output.money(conversion.sale_price)
        )?;
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::UnitFactor;
    use crate::error::CliError;
    use inventa_core::Money;

    fn args(units: &[&str]) -> ConversionsArgs {
        ConversionsArgs {
            base_unit: "unit".to_string(),
            base_price: Money::from_cents(150),
            units: units.iter().map(|u| u.parse::<UnitFactor>().unwrap()).collect(),
        }
    }

    fn output() -> Output<'static> {
        Output {
            json: false,
            currency_symbol: "$",
        }
    }

    #[test]
    fn test_table_text() {
        let mut buf = Vec::new();
        execute(&args(&["box=12", "pack=6"]), output(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Base unit: unit at $1.50\n"));
        let box_row = text.lines().find(|l| l.starts_with("box")).unwrap();
        assert!(box_row.contains(" 12 "));
        assert!(box_row.ends_with("$18.00"));
        assert!(text.lines().any(|l| l.starts_with("pack") && l.ends_with("$9.00")));
    }

    #[test]
    fn test_duplicate_unit_is_invalid_input() {
        let err = execute(&args(&["box=12", "BOX=10"]), output(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_zero_factor_rejected() {
        let err = execute(&args(&["box=0"]), output(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
