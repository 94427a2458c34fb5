use rust_decimal::Decimal;

use crate::config::{TaxYearConfig, UK_2024_25};
use crate::decimal::{clamp_non_negative, round_intermediate, round_money, to_percent};
use crate::tax::income_tax::calculate_income_tax_with;
use crate::tax::national_insurance::calculate_national_insurance_with;
use crate::types::{Money, Rate, TaxProfile};

/// Income tax plus National Insurance for a profile.
pub fn total_deductions_with(config: &TaxYearConfig, salary: Money, profile: &TaxProfile) -> Money {
    calculate_income_tax_with(config, salary, profile.has_deductions, profile.dependents)
        + calculate_national_insurance_with(config, salary)
}

/// Annual income left after income tax and National Insurance.
pub fn calculate_disposable_income(salary: Money, profile: &TaxProfile) -> Money {
    calculate_disposable_income_with(&UK_2024_25, salary, profile)
}

pub fn calculate_disposable_income_with(
    config: &TaxYearConfig,
    salary: Money,
    profile: &TaxProfile,
) -> Money {
    round_money(clamp_non_negative(
        salary - total_deductions_with(config, salary, profile),
    ))
}

/// Income tax plus National Insurance as a percentage of gross salary.
///
/// Returns zero for a zero salary.
pub fn calculate_effective_tax_rate(salary: Money, profile: &TaxProfile) -> Rate {
    calculate_effective_tax_rate_with(&UK_2024_25, salary, profile)
}

pub fn calculate_effective_tax_rate_with(
    config: &TaxYearConfig,
    salary: Money,
    profile: &TaxProfile,
) -> Rate {
    if salary.is_zero() {
        return Decimal::ZERO;
    }
    let share = round_intermediate(total_deductions_with(config, salary, profile) / salary);
    round_money(to_percent(share))
}
