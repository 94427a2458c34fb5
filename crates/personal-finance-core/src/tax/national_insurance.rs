use serde::{Deserialize, Serialize};

use crate::config::{TaxYearConfig, UK_2024_25};
use crate::decimal::{clamp_non_negative, round_money};
use crate::tax::bands::BandCharge;
use crate::types::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalInsuranceBreakdown {
    pub gross_income: Money,
    pub primary_threshold: Money,
    pub bands: Vec<BandCharge>,
    pub national_insurance: Money,
}

/// Class 1 employee National Insurance under the default 2024/25 rates.
pub fn calculate_national_insurance(salary: Money) -> Money {
    calculate_national_insurance_with(&UK_2024_25, salary)
}

pub fn calculate_national_insurance_with(config: &TaxYearConfig, salary: Money) -> Money {
    national_insurance_breakdown(config, salary).national_insurance
}

pub fn national_insurance_breakdown(
    config: &TaxYearConfig,
    salary: Money,
) -> NationalInsuranceBreakdown {
    let schedule = config.national_insurance.apply(salary);
    NationalInsuranceBreakdown {
        gross_income: salary,
        primary_threshold: config.national_insurance.threshold,
        bands: schedule.bands,
        national_insurance: round_money(clamp_non_negative(schedule.total)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_below_threshold() {
        assert_eq!(calculate_national_insurance(dec!(12_570)), Decimal::ZERO);
        assert_eq!(calculate_national_insurance(dec!(5_000)), Decimal::ZERO);
    }

    #[test]
    fn test_main_rate_only() {
        // (30000 - 12570) * 0.12 = 2091.60
        assert_eq!(calculate_national_insurance(dec!(30_000)), dec!(2_091.60));
    }

    #[test]
    fn test_upper_earnings_limit_is_inclusive() {
        // 37700 * 0.12
        assert_eq!(calculate_national_insurance(dec!(50_270)), dec!(4_524.00));
    }

    #[test]
    fn test_above_upper_earnings_limit() {
        // 4524 + (75000 - 50270) * 0.02 = 4524 + 494.60
        assert_eq!(calculate_national_insurance(dec!(75_000)), dec!(5_018.60));
    }

    #[test]
    fn test_rounding_half_up() {
        // (12570.04 - 12570) * 0.12 = 0.0048 -> 0.00
        assert_eq!(calculate_national_insurance(dec!(12_570.04)), dec!(0.00));
        // (12570.05 - 12570) * 0.12 = 0.006 -> 0.01
        assert_eq!(calculate_national_insurance(dec!(12_570.05)), dec!(0.01));
    }
}
