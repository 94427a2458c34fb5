use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use personal_finance_core::decimal::{format_amount, to_decimal_fraction, to_percent};

/// Arguments for amount formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatAmountArgs {
    /// Amount to format
    pub amount: Decimal,

    /// Treat the amount as a percentage and also show it as a fraction
    #[arg(long)]
    pub percent: bool,
}

pub fn run_format_amount(args: FormatAmountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut result = json!({
        "amount": args.amount,
        "formatted": format_amount(args.amount),
    });

    if args.percent {
        let fraction = to_decimal_fraction(args.amount);
        result["fraction"] = json!(fraction);
        result["percent"] = json!(to_percent(fraction));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_formatted_amount_truncates() {
        let value = run_format_amount(FormatAmountArgs {
            amount: dec!(1234567.899),
            percent: false,
        })
        .unwrap();
        assert_eq!(value["formatted"], "1,234,567.89");
        assert!(value.get("fraction").is_none());
    }

    #[test]
    fn test_percent_conversion() {
        let value = run_format_amount(FormatAmountArgs {
            amount: dec!(45),
            percent: true,
        })
        .unwrap();
        assert_eq!(value["fraction"], "0.45");
        assert_eq!(value["formatted"], "45.00");
    }
}
