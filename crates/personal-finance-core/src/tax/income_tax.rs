use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{TaxYearConfig, UK_2024_25};
use crate::decimal::{clamp_non_negative, round_money};
use crate::tax::bands::BandCharge;
use crate::types::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxBreakdown {
    pub gross_income: Money,
    pub personal_allowance: Money,
    pub taxable_income: Money,
    pub bands: Vec<BandCharge>,
    /// Tax from the bands before reliefs
    pub bracket_tax: Money,
    pub deduction_relief: Money,
    pub child_credit: Money,
    /// Final liability, clamped at zero and rounded to pence
    pub income_tax: Money,
}

/// UK income tax under the default 2024/25 rates.
pub fn calculate_income_tax(salary: Money, has_deductions: bool, dependents: u32) -> Money {
    calculate_income_tax_with(&UK_2024_25, salary, has_deductions, dependents)
}

pub fn calculate_income_tax_with(
    config: &TaxYearConfig,
    salary: Money,
    has_deductions: bool,
    dependents: u32,
) -> Money {
    income_tax_breakdown(config, salary, has_deductions, dependents).income_tax
}

/// Band-by-band income tax followed by the flat deduction relief and the
/// per-dependent child credit.
pub fn income_tax_breakdown(
    config: &TaxYearConfig,
    salary: Money,
    has_deductions: bool,
    dependents: u32,
) -> IncomeTaxBreakdown {
    let schedule = config.income_tax.apply(salary);

    // Nothing is owed, so no relief is consumed.
    if schedule.taxable_income.is_zero() {
        return IncomeTaxBreakdown {
            gross_income: salary,
            personal_allowance: config.income_tax.threshold,
            taxable_income: Decimal::ZERO,
            bands: schedule.bands,
            bracket_tax: Decimal::ZERO,
            deduction_relief: Decimal::ZERO,
            child_credit: Decimal::ZERO,
            income_tax: Decimal::ZERO,
        };
    }

    let deduction_relief = if has_deductions {
        config.reliefs.deduction_relief
    } else {
        Decimal::ZERO
    };
    let child_credit = config.reliefs.child_credit * Decimal::from(dependents);

    let income_tax =
        round_money(clamp_non_negative(schedule.total - deduction_relief - child_credit));

    IncomeTaxBreakdown {
        gross_income: salary,
        personal_allowance: config.income_tax.threshold,
        taxable_income: schedule.taxable_income,
        bands: schedule.bands,
        bracket_tax: schedule.total,
        deduction_relief,
        child_credit,
        income_tax,
    }
}
