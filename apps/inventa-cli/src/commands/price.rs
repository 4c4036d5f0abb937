//! `inventa price derive` and `inventa price check`.

use std::io::Write;

use inventa_core::{format_decimal, review_sale_price, PriceDerivation, DEFAULT_DECIMALS};

use super::Output;
use crate::cli::{CheckArgs, DeriveArgs};
use crate::config::AppConfig;
use crate::error::CliResult;

/// Derives a sale price. The margin falls back to the configured default.
pub fn derive<W: Write>(
    args: &DeriveArgs,
    config: &AppConfig,
    output: Output<'_>,
    out: &mut W,
) -> CliResult<u8> {
    let margin = args.margin.unwrap_or(config.pricing.default_margin);

    let derivation = PriceDerivation::derive(args.purchase, margin);

    if output.json {
        output.write_json(out, &derivation)?;
        return Ok(0);
    }

    writeln!(out, "Purchase price:  {}", output.money(derivation.purchase_price))?;
    writeln!(out, "Margin:          {}", derivation.margin)?;
    writeln!(out, "Sale price:      {}", output.money(derivation.sale_price))?;
    writeln!(
        out,
        "Applied margin:  {} ({}%)",
        output.money(derivation.applied_margin),
        format_decimal(derivation.applied_percentage, DEFAULT_DECIMALS)
    )?;
    if derivation.clamped {
        writeln!(out, "Note: margin would price below cost, sale price set to the purchase price")?;
    }

    Ok(0)
}

/// Reviews a hand-typed sale price. Below-cost prices print a warning and
/// still exit 0.
pub fn check<W: Write>(args: &CheckArgs, output: Output<'_>, out: &mut W) -> CliResult<u8> {
    let review = review_sale_price(args.purchase, args.sale);

    if output.json {
        output.write_json(out, &review)?;
        return Ok(0);
    }

    writeln!(out, "Purchase price:  {}", output.money(review.purchase_price))?;
    writeln!(out, "Sale price:      {}", output.money(review.sale_price))?;
    writeln!(out, "Minimum allowed: {}", output.money(review.minimum_allowed_price))?;
    writeln!(
        out,
        "Applied margin:  {} ({}%)",
        output.money(review.applied_margin),
        format_decimal(review.applied_percentage, DEFAULT_DECIMALS)
    )?;
    match &review.warning {
        Some(warning) => writeln!(out, "Warning: {warning}")?,
        None => writeln!(out, "OK")?,
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventa_core::{MarginSpec, Money};

    fn output(json: bool) -> Output<'static> {
        Output {
            json,
            currency_symbol: "$",
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> CliResult<u8>,
    {
        let mut buf = Vec::new();
        assert_eq!(f(&mut buf).unwrap(), 0);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_derive_uses_config_default_margin() {
        let args = DeriveArgs {
            purchase: Money::from_cents(10000),
            margin: None,
        };
        let text = render(|out| derive(&args, &AppConfig::default(), output(false), out));
        assert!(text.contains("Sale price:      $130.00"));
        assert!(text.contains("Applied margin:  $30.00 (30.00%)"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn test_derive_reports_clamp() {
        let args = DeriveArgs {
            purchase: Money::from_cents(10000),
            margin: Some(MarginSpec::fixed(Money::from_cents(-5000))),
        };
        let text = render(|out| derive(&args, &AppConfig::default(), output(false), out));
        assert!(text.contains("Sale price:      $100.00"));
        assert!(text.contains("Note:"));
    }

    #[test]
    fn test_derive_json() {
        let args = DeriveArgs {
            purchase: Money::from_cents(10000),
            margin: Some(MarginSpec::fixed(Money::from_cents(1500))),
        };
        let text = render(|out| derive(&args, &AppConfig::default(), output(true), out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["salePrice"], "115.00");
        assert_eq!(value["margin"]["kind"], "fixed");
    }

    #[test]
    fn test_check_below_cost_warns() {
        let args = CheckArgs {
            purchase: Money::from_cents(10000),
            sale: Money::from_cents(9000),
        };
        let text = render(|out| check(&args, output(false), out));
        assert!(text.contains("Minimum allowed: $100.00"));
        assert!(text.contains("Warning: Sale price 90.00 is below the minimum allowed price 100.00"));
    }
}
