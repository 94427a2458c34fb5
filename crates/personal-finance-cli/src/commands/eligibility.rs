use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::eligibility::{self, EligibilityFacts};

use super::reject_out_of_range;
use crate::input;

/// Arguments for the eligibility gates
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Age in years
    #[arg(long)]
    pub age: Option<u32>,

    /// Annual gross salary
    #[arg(long)]
    pub salary: Option<Decimal>,

    /// Account is currently overdrawn
    #[arg(long)]
    pub is_overdrawn: bool,

    /// Employment has been verified
    #[arg(long)]
    pub employment_verified: bool,

    /// Insurance policy is active
    #[arg(long)]
    pub insurance_active: bool,

    /// Defaults recorded recently
    #[arg(long)]
    pub has_recent_defaults: bool,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let facts: EligibilityFacts = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        EligibilityFacts {
            age: args.age.ok_or("--age is required (or provide --input)")?,
            salary: args
                .salary
                .ok_or("--salary is required (or provide --input)")?,
            is_overdrawn: args.is_overdrawn,
            employment_verified: args.employment_verified,
            insurance_active: args.insurance_active,
            has_recent_defaults: args.has_recent_defaults,
        }
    };
    reject_out_of_range("salary", facts.salary)?;

    let result = eligibility::evaluate_eligibility(&facts)?;
    Ok(serde_json::to_value(result)?)
}
