use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use personal_finance_core::mortgage::affordability::{self, AffordabilityInput};
use personal_finance_core::mortgage::lending::{
    age_multiplier, maximum_mortgage_for, MortgageApplicant,
};
use personal_finance_core::{with_metadata, TaxProfile, TaxYearConfig};

use super::reject_out_of_range;
use super::tax::RegionArg;
use crate::input;

/// Arguments for the full affordability assessment
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual gross salary
    #[arg(long)]
    pub salary: Option<Decimal>,

    /// Applicant age in years
    #[arg(long)]
    pub age: Option<u32>,

    /// Senior applicant uplift
    #[arg(long)]
    pub is_senior: bool,

    /// Minimum balance uplift
    #[arg(long)]
    pub has_minimum_balance: bool,

    /// Tax region of the profile
    #[arg(long, value_enum, default_value = "uk")]
    pub region: RegionArg,

    /// Apply the flat deduction relief
    #[arg(long)]
    pub has_deductions: bool,

    /// Number of dependents
    #[arg(long, default_value_t = 0)]
    pub dependents: u32,
}

/// Arguments for the maximum mortgage
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual gross salary
    #[arg(long)]
    pub salary: Option<Decimal>,

    /// Applicant age in years
    #[arg(long)]
    pub age: Option<u32>,

    /// Senior applicant uplift
    #[arg(long)]
    pub is_senior: bool,

    /// Minimum balance uplift
    #[arg(long)]
    pub has_minimum_balance: bool,
}

pub fn run_affordability(
    args: AffordabilityArgs,
    config: &TaxYearConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        AffordabilityInput {
            salary: args
                .salary
                .ok_or("--salary is required (or provide --input)")?,
            age: args.age.ok_or("--age is required (or provide --input)")?,
            is_senior: args.is_senior,
            has_minimum_balance: args.has_minimum_balance,
            tax_profile: TaxProfile {
                region: args.region.into(),
                has_deductions: args.has_deductions,
                dependents: args.dependents,
                ..Default::default()
            },
        }
    };

    let result = affordability::assess_affordability_with(config, &afford_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_mortgage(
    args: MortgageArgs,
    config: &TaxYearConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let applicant: MortgageApplicant = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        MortgageApplicant {
            salary: args
                .salary
                .ok_or("--salary is required (or provide --input)")?,
            age: args.age.ok_or("--age is required (or provide --input)")?,
            is_senior: args.is_senior,
            has_minimum_balance: args.has_minimum_balance,
        }
    };

    mortgage_output(config, &applicant)
}

fn mortgage_output(
    config: &TaxYearConfig,
    applicant: &MortgageApplicant,
) -> Result<Value, Box<dyn std::error::Error>> {
    reject_out_of_range("salary", applicant.salary)?;

    let start = Instant::now();
    let multiplier = age_multiplier(&config.mortgage, applicant.age);
    let maximum_mortgage = maximum_mortgage_for(config, applicant);

    let output = with_metadata(
        "Income-multiple lending limit scaled by age band, senior and minimum-balance uplifts",
        &json!({
            "income_multiple": config.mortgage.income_multiple,
            "senior_uplift": config.mortgage.senior_uplift,
            "minimum_balance_uplift": config.mortgage.minimum_balance_uplift,
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        json!({
            "salary": applicant.salary,
            "age": applicant.age,
            "age_multiplier": multiplier,
            "is_senior": applicant.is_senior,
            "has_minimum_balance": applicant.has_minimum_balance,
            "maximum_mortgage": maximum_mortgage,
        }),
    );
    Ok(serde_json::to_value(output)?)
}
