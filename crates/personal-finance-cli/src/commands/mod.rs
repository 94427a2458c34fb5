pub mod decimal;
pub mod eligibility;
pub mod mortgage;
pub mod risk;
pub mod tax;

use rust_decimal::Decimal;

use personal_finance_core::config::MAX_INCOME;
use personal_finance_core::decimal::format_amount;

/// Reject an income outside `[0, MAX_INCOME]` before it reaches the core,
/// naming the flag.
pub(crate) fn reject_out_of_range(
    field: &str,
    value: Decimal,
) -> Result<(), Box<dyn std::error::Error>> {
    let flag = field.replace('_', "-");
    if value < Decimal::ZERO {
        return Err(format!("--{flag} cannot be negative").into());
    }
    if value > MAX_INCOME {
        return Err(format!("--{flag} cannot exceed {}", format_amount(MAX_INCOME)).into());
    }
    Ok(())
}
