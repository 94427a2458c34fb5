use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{MortgageConfig, TaxYearConfig, UK_2024_25};
use crate::decimal::round_money;
use crate::types::{Money, Multiple};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageApplicant {
    pub salary: Money,
    pub age: u32,
    #[serde(default)]
    pub is_senior: bool,
    #[serde(default)]
    pub has_minimum_balance: bool,
}

/// Multiplier for the first age band containing `age`.
pub fn age_multiplier(config: &MortgageConfig, age: u32) -> Multiple {
    config
        .age_multipliers
        .iter()
        .find(|band| band.max_age.map_or(true, |max| age <= max))
        .map(|band| band.multiplier)
        .unwrap_or(Decimal::ONE)
}

/// Maximum lending: 4.5x salary scaled by one age multiplier, then by the
/// senior and minimum-balance uplifts where they apply.
pub fn calculate_maximum_mortgage(
    salary: Money,
    age: u32,
    is_senior: bool,
    has_minimum_balance: bool,
) -> Money {
    calculate_maximum_mortgage_with(&UK_2024_25, salary, age, is_senior, has_minimum_balance)
}

pub fn calculate_maximum_mortgage_with(
    config: &TaxYearConfig,
    salary: Money,
    age: u32,
    is_senior: bool,
    has_minimum_balance: bool,
) -> Money {
    let m = &config.mortgage;
    let mut amount = salary * m.income_multiple * age_multiplier(m, age);
    if is_senior {
        amount *= m.senior_uplift;
    }
    if has_minimum_balance {
        amount *= m.minimum_balance_uplift;
    }
    round_money(amount)
}

pub fn maximum_mortgage_for(config: &TaxYearConfig, applicant: &MortgageApplicant) -> Money {
    calculate_maximum_mortgage_with(
        config,
        applicant.salary,
        applicant.age,
        applicant.is_senior,
        applicant.has_minimum_balance,
    )
}
