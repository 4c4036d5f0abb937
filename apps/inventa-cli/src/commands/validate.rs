//! `inventa validate`: form-field check of a decimal amount.

use std::io::Write;

use inventa_core::DecimalInputCheck;

use super::Output;
use crate::cli::ValidateArgs;
use crate::error::CliResult;

/// Exit code for a rejected value.
const INVALID: u8 = 2;

pub fn execute<W: Write>(args: &ValidateArgs, output: Output<'_>, out: &mut W) -> CliResult<u8> {
    let check = DecimalInputCheck::check(&args.input);

    if output.json {
        output.write_json(out, &check)?;
    } else if check.valid {
        writeln!(out, "valid: {}", check.value)?;
    } else {
        writeln!(
            out,
            "invalid: {}",
            check.error.as_deref().unwrap_or("value is not a valid amount")
        )?;
    }

    Ok(if check.valid { 0 } else { INVALID })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, json: bool) -> (u8, String) {
        let args = ValidateArgs {
            input: input.to_string(),
        };
        let output = Output {
            json,
            currency_symbol: "$",
        };
        let mut buf = Vec::new();
        let code = execute(&args, output, &mut buf).unwrap();
        (code, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_valid_amount() {
        let (code, text) = run("12.5", false);
        assert_eq!(code, 0);
        assert_eq!(text, "valid: 12.50\n");
    }

    #[test]
    fn test_invalid_amounts_exit_2() {
        for input in ["abc", "-5", "", "1.234"] {
            let (code, text) = run(input, false);
            assert_eq!(code, INVALID, "{input:?}");
            assert!(text.starts_with("invalid: "), "{input:?}");
        }
    }

    #[test]
    fn test_json_echoes_input_on_failure() {
        let (code, text) = run("abc", true);
        assert_eq!(code, INVALID);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["value"], "abc");
        assert!(value["error"].is_string());
    }
}
