use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::{validate_income, TaxYearConfig, UK_2024_25};
use crate::decimal::format_amount;
use crate::mortgage::lending::calculate_maximum_mortgage_with;
use crate::mortgage::spend::{monthly_spend_breakdown, MonthlySpendBreakdown};
use crate::tax::income_tax::{income_tax_breakdown, IncomeTaxBreakdown};
use crate::tax::national_insurance::{national_insurance_breakdown, NationalInsuranceBreakdown};
use crate::tax::regional::estimate_regional_tax;
use crate::tax::take_home::{calculate_disposable_income_with, calculate_effective_tax_rate_with};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Region, TaxProfile};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub salary: Money,
    pub age: u32,
    #[serde(default)]
    pub is_senior: bool,
    #[serde(default)]
    pub has_minimum_balance: bool,
    #[serde(default)]
    pub tax_profile: TaxProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub income_tax: IncomeTaxBreakdown,
    pub national_insurance: NationalInsuranceBreakdown,
    pub disposable_income: Money,
    /// Percentage of gross salary (29.93 = 29.93%)
    pub effective_tax_rate: Rate,
    pub maximum_mortgage: Money,
    pub monthly_spend: MonthlySpendBreakdown,
    /// Flat-rate estimate for non-UK profiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_tax_estimate: Option<Money>,
}

// ---------------------------------------------------------------------------
// Affordability assessment
// ---------------------------------------------------------------------------

/// Every bracket-engine figure for one applicant under the default rates.
pub fn assess_affordability(
    input: &AffordabilityInput,
) -> FinanceResult<ComputationOutput<AffordabilityOutput>> {
    assess_affordability_with(&UK_2024_25, input)
}

pub fn assess_affordability_with(
    config: &TaxYearConfig,
    input: &AffordabilityInput,
) -> FinanceResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_income("salary", input.salary)?;

    tracing::debug!(
        salary = %input.salary,
        age = input.age,
        tax_year = %config.name,
        "assessing affordability"
    );

    let salary = input.salary;
    let profile = &input.tax_profile;

    let income_tax = income_tax_breakdown(config, salary, profile.has_deductions, profile.dependents);
    let national_insurance = national_insurance_breakdown(config, salary);
    let disposable_income = calculate_disposable_income_with(config, salary, profile);
    let effective_tax_rate = calculate_effective_tax_rate_with(config, salary, profile);
    let maximum_mortgage = calculate_maximum_mortgage_with(
        config,
        salary,
        input.age,
        input.is_senior,
        input.has_minimum_balance,
    );
    let monthly_spend = monthly_spend_breakdown(config, salary, profile);

    if income_tax.taxable_income.is_zero() {
        warnings.push(format!(
            "Salary is within the personal allowance of {}; no income tax is due.",
            format_amount(config.income_tax.threshold)
        ));
    } else if income_tax.income_tax.is_zero() {
        warnings.push("Reliefs and credits exceed the bracket tax; liability reported as zero.".into());
    }

    if monthly_spend.clamped {
        tracing::warn!(salary = %salary, "monthly spend clamped to zero");
        warnings.push(
            "Net monthly income does not cover the estimated mortgage payment; \
             maximum spend reported as zero."
                .into(),
        );
    }

    let regional_tax_estimate = if profile.region == Region::Uk {
        None
    } else {
        warnings.push(format!(
            "UK bands applied to a {} profile; see regional_tax_estimate for the flat-rate figure.",
            profile.region
        ));
        Some(estimate_regional_tax(salary, profile))
    };

    let output = AffordabilityOutput {
        income_tax,
        national_insurance,
        disposable_income,
        effective_tax_rate,
        maximum_mortgage,
        monthly_spend,
        regional_tax_estimate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "UK affordability: marginal income tax and Class 1 NI, disposable income, \
         effective rate, income-multiple mortgage limit and discretionary monthly spend",
        &serde_json::json!({
            "tax_year": config.name,
            "salary": salary.to_string(),
            "age": input.age,
            "is_senior": input.is_senior,
            "has_minimum_balance": input.has_minimum_balance,
            "region": profile.region.to_string(),
            "dependents": profile.dependents,
            "has_deductions": profile.has_deductions,
            "mortgage_income_multiple": config.mortgage.income_multiple.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_INCOME;
    use crate::error::FinanceError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_input() -> AffordabilityInput {
        AffordabilityInput {
            salary: dec!(75_000),
            age: 45,
            is_senior: true,
            has_minimum_balance: true,
            tax_profile: TaxProfile::default(),
        }
    }

    #[test]
    fn test_assessment_figures() {
        let out = assess_affordability(&sample_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.income_tax.income_tax, dec!(17_432.00));
        assert_eq!(r.national_insurance.national_insurance, dec!(5_018.60));
        assert_eq!(r.disposable_income, dec!(52_549.40));
        assert_eq!(r.effective_tax_rate, dec!(29.93));
        // 75000 * 4.5 * 0.95 * 1.1 * 1.05
        assert_eq!(r.maximum_mortgage, dec!(370_321.88));
        assert_eq!(r.monthly_spend.maximum_monthly_spend, dec!(2_003.30));
        assert!(r.regional_tax_estimate.is_none());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_negative_salary_rejected() {
        let mut input = sample_input();
        input.salary = dec!(-1);
        let err = assess_affordability(&input).unwrap_err();
        match err {
            FinanceError::InvalidInput { field, .. } => assert_eq!(field, "salary"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_salary_above_income_cap_rejected() {
        let mut input = sample_input();
        input.salary = Decimal::MAX / dec!(2);
        match assess_affordability(&input).unwrap_err() {
            FinanceError::InvalidInput { field, .. } => assert_eq!(field, "salary"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }

        input.salary = MAX_INCOME;
        let out = assess_affordability(&input).unwrap();
        assert!(out.result.maximum_mortgage > Decimal::ZERO);
    }

    #[test]
    fn test_allowance_warning() {
        let mut input = sample_input();
        input.salary = dec!(12_000);
        let out = assess_affordability(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("12,570.00")));
    }

    #[test]
    fn test_non_uk_profile_gets_regional_estimate() {
        let mut input = sample_input();
        input.tax_profile.region = Region::Us;
        let out = assess_affordability(&input).unwrap();
        // 75000 * 0.20
        assert_eq!(out.result.regional_tax_estimate, Some(dec!(15_000.00)));
        assert!(out.warnings.iter().any(|w| w.contains("US")));
    }

    #[test]
    fn test_input_defaults_from_json() {
        let input: AffordabilityInput =
            serde_json::from_str(r#"{"salary": "30000", "age": 30}"#).unwrap();
        assert!(!input.is_senior);
        assert_eq!(input.tax_profile, TaxProfile::default());
    }
}
