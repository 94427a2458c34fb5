//! Step-function risk multipliers. Each table is ordered by ascending bound;
//! the first bound the value does not exceed selects the factor, and values
//! above every bound take the fallback. Bounds are inclusive.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::types::{Money, Multiple, Rate};
use crate::FinanceResult;

type Threshold = (Decimal, Multiple);

// Younger investors carry more risk, so the age table runs high to low.
const AGE_THRESHOLDS: [Threshold; 8] = [
    (dec!(35), dec!(1.24)),
    (dec!(45), dec!(1.18)),
    (dec!(55), dec!(1.12)),
    (dec!(60), dec!(1.06)),
    (dec!(65), dec!(1.00)),
    (dec!(70), dec!(0.95)),
    (dec!(75), dec!(0.90)),
    (dec!(80), dec!(0.85)),
];
const AGE_FALLBACK: Multiple = dec!(0.80);

const INCOME_THRESHOLDS: [Threshold; 8] = [
    (dec!(50_000), dec!(0.80)),
    (dec!(75_000), dec!(0.85)),
    (dec!(100_000), dec!(0.90)),
    (dec!(125_000), dec!(0.95)),
    (dec!(150_000), dec!(1.00)),
    (dec!(200_000), dec!(1.06)),
    (dec!(300_000), dec!(1.12)),
    (dec!(500_000), dec!(1.18)),
];
const INCOME_FALLBACK: Multiple = dec!(1.24);

const NET_WORTH_THRESHOLDS: [Threshold; 8] = [
    (dec!(25_000), dec!(0.80)),
    (dec!(50_000), dec!(0.85)),
    (dec!(100_000), dec!(0.90)),
    (dec!(150_000), dec!(0.95)),
    (dec!(250_000), dec!(1.00)),
    (dec!(500_000), dec!(1.06)),
    (dec!(1_000_000), dec!(1.12)),
    (dec!(4_000_000), dec!(1.18)),
];
const NET_WORTH_FALLBACK: Multiple = dec!(1.24);

const TAX_RATE_THRESHOLDS: [Threshold; 8] = [
    (dec!(0.12), dec!(0.80)),
    (dec!(0.14), dec!(0.85)),
    (dec!(0.16), dec!(0.90)),
    (dec!(0.18), dec!(0.95)),
    (dec!(0.20), dec!(1.00)),
    (dec!(0.25), dec!(1.06)),
    (dec!(0.30), dec!(1.12)),
    (dec!(0.35), dec!(1.18)),
];
const TAX_RATE_FALLBACK: Multiple = dec!(1.24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Age,
    Income,
    NetWorth,
    TaxRate,
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Age => write!(f, "age"),
            Self::Income => write!(f, "income"),
            Self::NetWorth => write!(f, "net_worth"),
            Self::TaxRate => write!(f, "marginal_tax_rate"),
        }
    }
}

/// One row of a factor table, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorBand {
    /// Inclusive upper bound; `None` for the fallback row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_to: Option<Decimal>,
    pub factor: Multiple,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 4] = [
        RiskFactor::Age,
        RiskFactor::Income,
        RiskFactor::NetWorth,
        RiskFactor::TaxRate,
    ];

    fn table(self) -> (&'static [Threshold], Multiple) {
        match self {
            Self::Age => (&AGE_THRESHOLDS, AGE_FALLBACK),
            Self::Income => (&INCOME_THRESHOLDS, INCOME_FALLBACK),
            Self::NetWorth => (&NET_WORTH_THRESHOLDS, NET_WORTH_FALLBACK),
            Self::TaxRate => (&TAX_RATE_THRESHOLDS, TAX_RATE_FALLBACK),
        }
    }

    /// Multiplier for `value`. Negative values are rejected before lookup.
    pub fn factor_for(self, value: Decimal) -> FinanceResult<Multiple> {
        if value < Decimal::ZERO {
            return Err(FinanceError::invalid(&self.to_string(), "Must not be negative"));
        }
        let (thresholds, fallback) = self.table();
        Ok(thresholds
            .iter()
            .find(|(bound, _)| value <= *bound)
            .map(|(_, factor)| *factor)
            .unwrap_or(fallback))
    }

    pub fn bands(self) -> Vec<FactorBand> {
        let (thresholds, fallback) = self.table();
        thresholds
            .iter()
            .map(|(bound, factor)| FactorBand {
                up_to: Some(*bound),
                factor: *factor,
            })
            .chain(std::iter::once(FactorBand {
                up_to: None,
                factor: fallback,
            }))
            .collect()
    }
}

pub fn age_factor(age: i32) -> FinanceResult<Multiple> {
    RiskFactor::Age.factor_for(Decimal::from(age))
}

pub fn income_factor(income: Money) -> FinanceResult<Multiple> {
    RiskFactor::Income.factor_for(income)
}

pub fn net_worth_factor(net_worth: Money) -> FinanceResult<Multiple> {
    RiskFactor::NetWorth.factor_for(net_worth)
}

pub fn tax_rate_factor(marginal_tax_rate: Rate) -> FinanceResult<Multiple> {
    RiskFactor::TaxRate.factor_for(marginal_tax_rate)
}
