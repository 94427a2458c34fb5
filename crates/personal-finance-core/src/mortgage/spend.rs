use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::{TaxYearConfig, UK_2024_25};
use crate::decimal::round_money;
use crate::tax::take_home::total_deductions_with;
use crate::types::{Money, TaxProfile};

const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpendBreakdown {
    pub net_monthly_income: Money,
    pub gross_monthly_income: Money,
    pub estimated_mortgage_payment: Money,
    pub maximum_monthly_spend: Money,
    /// True when the raw figure was negative and reported as zero
    pub clamped: bool,
}

fn monthly(annual: Money) -> Money {
    round_money(annual / MONTHS_PER_YEAR)
}

/// Discretionary monthly spend after tax, NI, an assumed mortgage payment and
/// a savings buffer.
pub fn calculate_maximum_monthly_spend(salary: Money, profile: &TaxProfile) -> Money {
    calculate_maximum_monthly_spend_with(&UK_2024_25, salary, profile)
}

pub fn calculate_maximum_monthly_spend_with(
    config: &TaxYearConfig,
    salary: Money,
    profile: &TaxProfile,
) -> Money {
    monthly_spend_breakdown(config, salary, profile).maximum_monthly_spend
}

pub fn monthly_spend_breakdown(
    config: &TaxYearConfig,
    salary: Money,
    profile: &TaxProfile,
) -> MonthlySpendBreakdown {
    let net_monthly_income = monthly(salary - total_deductions_with(config, salary, profile));
    let gross_monthly_income = monthly(salary);
    let estimated_mortgage_payment =
        gross_monthly_income * config.spending.mortgage_share_of_gross;

    let raw = (net_monthly_income - estimated_mortgage_payment) * config.spending.spend_buffer;
    let clamped = raw < Decimal::ZERO;
    let maximum_monthly_spend = if clamped {
        Decimal::ZERO
    } else {
        round_money(raw)
    };

    MonthlySpendBreakdown {
        net_monthly_income,
        gross_monthly_income,
        estimated_mortgage_payment: round_money(estimated_mortgage_payment),
        maximum_monthly_spend,
        clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_spend_higher_rate_payer() {
        // net 52549.40 / 12 = 4379.12; payment 6250 * 0.30 = 1875
        // (4379.12 - 1875) * 0.80 = 2003.296
        let b = monthly_spend_breakdown(&UK_2024_25, dec!(75_000), &TaxProfile::default());
        assert_eq!(b.net_monthly_income, dec!(4_379.12));
        assert_eq!(b.gross_monthly_income, dec!(6_250.00));
        assert_eq!(b.estimated_mortgage_payment, dec!(1_875.00));
        assert_eq!(b.maximum_monthly_spend, dec!(2_003.30));
        assert!(!b.clamped);
    }

    #[test]
    fn test_monthly_spend_basic_rate_payer() {
        // net (30000 - 3486 - 2091.60) / 12 = 2035.20; payment 750
        assert_eq!(
            calculate_maximum_monthly_spend(dec!(30_000), &TaxProfile::default()),
            dec!(1_028.16)
        );
    }

    #[test]
    fn test_monthly_spend_clamped_to_zero() {
        let mut config = TaxYearConfig::uk_2024_25();
        config.spending.mortgage_share_of_gross = Decimal::ONE;
        let b = monthly_spend_breakdown(&config, dec!(40_000), &TaxProfile::default());
        assert_eq!(b.maximum_monthly_spend, Decimal::ZERO);
        assert!(b.clamped);
    }

    #[test]
    fn test_zero_salary() {
        assert_eq!(
            calculate_maximum_monthly_spend(Decimal::ZERO, &TaxProfile::default()),
            Decimal::ZERO
        );
    }
}
