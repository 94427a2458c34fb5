use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;

use personal_finance_core::tax::income_tax::income_tax_breakdown;
use personal_finance_core::tax::national_insurance::national_insurance_breakdown;
use personal_finance_core::tax::regional::{estimate_regional_tax, is_low_income, regional_flat_rate};
use personal_finance_core::{with_metadata, Region, TaxProfile, TaxYearConfig};

use super::reject_out_of_range;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegionArg {
    Uk,
    Us,
    Eu,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Uk => Region::Uk,
            RegionArg::Us => Region::Us,
            RegionArg::Eu => Region::Eu,
        }
    }
}

/// Arguments for UK income tax
#[derive(Args)]
pub struct IncomeTaxArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual gross salary
    #[arg(long)]
    pub salary: Option<Decimal>,

    /// Apply the flat deduction relief
    #[arg(long)]
    pub has_deductions: bool,

    /// Number of dependents for the child credit
    #[arg(long, default_value_t = 0)]
    pub dependents: u32,
}

#[derive(Debug, Deserialize)]
struct IncomeTaxInput {
    salary: Decimal,
    #[serde(default)]
    has_deductions: bool,
    #[serde(default)]
    dependents: u32,
}

/// Arguments for Class 1 National Insurance
#[derive(Args)]
pub struct NationalInsuranceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual gross salary
    #[arg(long)]
    pub salary: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct SalaryInput {
    salary: Decimal,
}

/// Arguments for the flat-rate regional estimate
#[derive(Args)]
pub struct RegionalTaxArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual gross income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Tax region
    #[arg(long, value_enum, default_value = "uk")]
    pub region: RegionArg,

    /// Apply the regional deduction
    #[arg(long)]
    pub has_deductions: bool,

    /// Number of dependents
    #[arg(long, default_value_t = 0)]
    pub dependents: u32,
}

#[derive(Debug, Deserialize)]
struct RegionalTaxInput {
    income: Decimal,
    #[serde(default)]
    profile: TaxProfile,
}

pub fn run_income_tax(
    args: IncomeTaxArgs,
    config: &TaxYearConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input: IncomeTaxInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        IncomeTaxInput {
            salary: args
                .salary
                .ok_or("--salary is required (or provide --input)")?,
            has_deductions: args.has_deductions,
            dependents: args.dependents,
        }
    };
    reject_out_of_range("salary", tax_input.salary)?;

    let start = Instant::now();
    let breakdown = income_tax_breakdown(
        config,
        tax_input.salary,
        tax_input.has_deductions,
        tax_input.dependents,
    );
    let mut warnings = Vec::new();
    if breakdown.taxable_income.is_zero() {
        warnings.push("Salary is within the personal allowance".to_string());
    }

    let output = with_metadata(
        "UK income tax: marginal bands above the personal allowance, less deduction relief and child credit",
        &json!({
            "tax_year": config.name,
            "salary": tax_input.salary.to_string(),
            "has_deductions": tax_input.has_deductions,
            "dependents": tax_input.dependents,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        breakdown,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_national_insurance(
    args: NationalInsuranceArgs,
    config: &TaxYearConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let ni_input: SalaryInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        SalaryInput {
            salary: args
                .salary
                .ok_or("--salary is required (or provide --input)")?,
        }
    };
    reject_out_of_range("salary", ni_input.salary)?;

    let start = Instant::now();
    let breakdown = national_insurance_breakdown(config, ni_input.salary);
    let output = with_metadata(
        "Class 1 employee National Insurance: main rate to the upper earnings limit, upper rate above",
        &json!({
            "tax_year": config.name,
            "salary": ni_input.salary.to_string(),
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        breakdown,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_regional_tax(args: RegionalTaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let regional_input: RegionalTaxInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        RegionalTaxInput {
            income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            profile: TaxProfile {
                region: args.region.into(),
                has_deductions: args.has_deductions,
                dependents: args.dependents,
                ..Default::default()
            },
        }
    };
    reject_out_of_range("income", regional_input.income)?;

    let start = Instant::now();
    let income = regional_input.income;
    let profile = &regional_input.profile;
    let rate = regional_flat_rate(profile.region, income);
    let tax = estimate_regional_tax(income, profile);

    let output = with_metadata(
        "Flat-rate regional estimate: one tier rate on the whole income, less deduction and dependent credits",
        profile,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        json!({
            "region": profile.region.to_string(),
            "income": income,
            "flat_rate": rate,
            "regional_tax": tax,
            "is_low_income": is_low_income(income),
        }),
    );
    Ok(serde_json::to_value(output)?)
}
