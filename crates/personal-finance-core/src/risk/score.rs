use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::decimal::{round_half_up, round_intermediate};
use crate::error::FinanceError;
use crate::risk::factors::{age_factor, income_factor, net_worth_factor, tax_rate_factor};
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Rate};
use crate::FinanceResult;

/// Combined factor that maps to a score of 1.
pub const LOWER_BOUND: Decimal = dec!(0.41);
/// Combined factor that maps to a score of 25.
pub const UPPER_BOUND: Decimal = dec!(2.36);

pub const RISK_SCORE_MIN: i32 = 6;
pub const RISK_SCORE_MAX: i32 = 20;

const SCORE_SPAN: Decimal = dec!(12);
const LOWER_ORIGIN: Decimal = dec!(1);
const UPPER_ORIGIN: Decimal = dec!(13);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub age: i32,
    pub income: Money,
    pub net_worth: Money,
    /// Combined federal and regional marginal rate as a fraction
    pub marginal_tax_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub age_factor: Multiple,
    pub income_factor: Multiple,
    pub net_worth_factor: Multiple,
    pub tax_rate_factor: Multiple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScoreOutput {
    pub factors: FactorBreakdown,
    pub combined_factor: Multiple,
    /// Score before clamping; may fall outside the published range
    pub raw_score: i32,
    pub risk_score: i32,
}

// ---------------------------------------------------------------------------
// Score arithmetic
// ---------------------------------------------------------------------------

/// Marginal rate the risk engine receives: federal plus regional.
pub fn marginal_tax_rate(federal: Rate, regional: Rate) -> Rate {
    federal + regional
}

pub fn factor_breakdown(profile: &RiskProfile) -> FinanceResult<FactorBreakdown> {
    Ok(FactorBreakdown {
        age_factor: age_factor(profile.age)?,
        income_factor: income_factor(profile.income)?,
        net_worth_factor: net_worth_factor(profile.net_worth)?,
        tax_rate_factor: tax_rate_factor(profile.marginal_tax_rate)?,
    })
}

/// Exact product of the four factors.
pub fn combine_factors(factors: &FactorBreakdown) -> Multiple {
    factors.age_factor * factors.income_factor * factors.net_worth_factor * factors.tax_rate_factor
}

/// Two-piece linear remap of the combined factor onto the score line.
///
/// Below 1 the range `[0.41, 1)` maps onto `[1, 13)`; from 1 upward the range
/// `[1, 2.36]` maps onto `[13, 25]`. Both pieces meet at 13.
pub fn map_combined_factor(combined: Multiple) -> FinanceResult<i32> {
    let scaled = if combined < Decimal::ONE {
        round_intermediate((combined - LOWER_BOUND) / (Decimal::ONE - LOWER_BOUND)) * SCORE_SPAN
            + LOWER_ORIGIN
    } else {
        round_intermediate((combined - Decimal::ONE) / (UPPER_BOUND - Decimal::ONE)) * SCORE_SPAN
            + UPPER_ORIGIN
    };

    round_half_up(scaled, 0)
        .to_i32()
        .ok_or_else(|| {
            FinanceError::invalid(
                "combined_factor",
                format!("Combined factor {combined} maps outside the integer score range"),
            )
        })
}

/// Saturate into `[6, 20]`.
pub fn clamp_risk_score(raw: i32) -> i32 {
    raw.clamp(RISK_SCORE_MIN, RISK_SCORE_MAX)
}

pub fn calculate_risk_score(
    age: i32,
    income: Money,
    net_worth: Money,
    marginal_tax_rate: Rate,
) -> FinanceResult<i32> {
    let profile = RiskProfile {
        age,
        income,
        net_worth,
        marginal_tax_rate,
    };
    let factors = factor_breakdown(&profile)?;
    Ok(clamp_risk_score(map_combined_factor(combine_factors(&factors))?))
}

/// Risk score with its factor breakdown.
pub fn score_risk_profile(
    profile: &RiskProfile,
) -> FinanceResult<ComputationOutput<RiskScoreOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    tracing::debug!(
        age = profile.age,
        income = %profile.income,
        net_worth = %profile.net_worth,
        marginal_tax_rate = %profile.marginal_tax_rate,
        "scoring risk profile"
    );

    let factors = factor_breakdown(profile)?;
    let combined_factor = combine_factors(&factors);
    let raw_score = map_combined_factor(combined_factor)?;
    let risk_score = clamp_risk_score(raw_score);

    if raw_score != risk_score {
        warnings.push(format!(
            "Raw score {raw_score} clamped to {risk_score} (range {RISK_SCORE_MIN}-{RISK_SCORE_MAX})"
        ));
    }

    let output = RiskScoreOutput {
        factors,
        combined_factor,
        raw_score,
        risk_score,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Multiplicative risk score: age, income, net worth and marginal tax rate factors, \
         two-piece linear remap around a combined factor of 1, clamped to 6-20",
        &serde_json::json!({
            "age": profile.age,
            "income": profile.income.to_string(),
            "net_worth": profile.net_worth.to_string(),
            "marginal_tax_rate": profile.marginal_tax_rate.to_string(),
            "lower_bound": LOWER_BOUND.to_string(),
            "upper_bound": UPPER_BOUND.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
