use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use personal_finance_core::risk::allocation::{self, AllocationCheckInput};
use personal_finance_core::risk::factors::RiskFactor;
use personal_finance_core::risk::score::{self, RiskProfile, LOWER_BOUND, UPPER_BOUND};

use crate::input;

/// Arguments for the investment risk score
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RiskScoreArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Age in years
    #[arg(long)]
    pub age: Option<i32>,

    /// Annual income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Net worth
    #[arg(long)]
    pub net_worth: Option<Decimal>,

    /// Combined marginal tax rate as a decimal (0.40 = 40%)
    #[arg(long)]
    pub marginal_tax_rate: Option<Decimal>,

    /// Federal marginal rate, summed with --regional-rate when
    /// --marginal-tax-rate is absent
    #[arg(long)]
    pub federal_rate: Option<Decimal>,

    /// Regional marginal rate
    #[arg(long)]
    pub regional_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FactorArg {
    Age,
    Income,
    NetWorth,
    TaxRate,
}

impl From<FactorArg> for RiskFactor {
    fn from(arg: FactorArg) -> Self {
        match arg {
            FactorArg::Age => RiskFactor::Age,
            FactorArg::Income => RiskFactor::Income,
            FactorArg::NetWorth => RiskFactor::NetWorth,
            FactorArg::TaxRate => RiskFactor::TaxRate,
        }
    }
}

/// Arguments for printing the factor tables
#[derive(Args)]
pub struct RiskFactorsArgs {
    /// Only print this factor's table
    #[arg(long, value_enum)]
    pub factor: Option<FactorArg>,
}

/// Arguments for allocation validation
#[derive(Args)]
pub struct AllocationArgs {
    /// Path to JSON input file with `allocation` and `recommendation`
    #[arg(long)]
    pub input: Option<String>,
}

fn combined_rate(args: &RiskScoreArgs) -> Result<Decimal, Box<dyn std::error::Error>> {
    if let Some(rate) = args.marginal_tax_rate {
        return Ok(rate);
    }
    match (args.federal_rate, args.regional_rate) {
        (Some(federal), regional) => Ok(score::marginal_tax_rate(
            federal,
            regional.unwrap_or(Decimal::ZERO),
        )),
        (None, _) => Err(
            "--marginal-tax-rate (or --federal-rate) is required (or provide --input)".into(),
        ),
    }
}

pub fn run_risk_score(args: RiskScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile: RiskProfile = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        RiskProfile {
            age: args.age.ok_or("--age is required (or provide --input)")?,
            income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            net_worth: args
                .net_worth
                .ok_or("--net-worth is required (or provide --input)")?,
            marginal_tax_rate: combined_rate(&args)?,
        }
    };

    let result = score::score_risk_profile(&profile)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_risk_factors(args: RiskFactorsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let factors: Vec<RiskFactor> = match args.factor {
        Some(f) => vec![f.into()],
        None => RiskFactor::ALL.to_vec(),
    };

    let tables: Vec<Value> = factors
        .into_iter()
        .map(|factor| {
            json!({
                "factor": factor.to_string(),
                "bands": factor.bands(),
            })
        })
        .collect();

    Ok(json!({
        "result": tables,
        "assumptions": {
            "lower_bound": LOWER_BOUND,
            "upper_bound": UPPER_BOUND,
            "score_range": [score::RISK_SCORE_MIN, score::RISK_SCORE_MAX],
        },
        "methodology": "Ordered threshold tables; the first band whose inclusive bound \
                        covers the value applies, otherwise the fallback",
        "warnings": [],
    }))
}

pub fn run_allocation_check(args: AllocationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let check_input: AllocationCheckInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin_as()? {
        data
    } else {
        return Err("--input file (or piped JSON) is required for allocation checks".into());
    };

    let result = allocation::validate_allocation(&check_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args() -> RiskScoreArgs {
        RiskScoreArgs {
            input: None,
            age: Some(40),
            income: Some(dec!(60_000)),
            net_worth: Some(dec!(100_000)),
            marginal_tax_rate: None,
            federal_rate: None,
            regional_rate: None,
        }
    }

    #[test]
    fn test_explicit_rate_wins() {
        let mut a = args();
        a.marginal_tax_rate = Some(dec!(0.40));
        a.federal_rate = Some(dec!(0.20));
        assert_eq!(combined_rate(&a).unwrap(), dec!(0.40));
    }

    #[test]
    fn test_rate_from_components() {
        let mut a = args();
        a.federal_rate = Some(dec!(0.22));
        a.regional_rate = Some(dec!(0.05));
        assert_eq!(combined_rate(&a).unwrap(), dec!(0.27));
        a.regional_rate = None;
        assert_eq!(combined_rate(&a).unwrap(), dec!(0.22));
    }

    #[test]
    fn test_missing_rate_is_an_error() {
        assert!(combined_rate(&args()).is_err());
    }

    #[test]
    fn test_factor_tables_listed() {
        let value = run_risk_factors(RiskFactorsArgs { factor: None }).unwrap();
        assert_eq!(value["result"].as_array().unwrap().len(), 4);

        let value = run_risk_factors(RiskFactorsArgs {
            factor: Some(FactorArg::NetWorth),
        })
        .unwrap();
        assert_eq!(value["result"][0]["factor"], "net_worth");
    }
}
