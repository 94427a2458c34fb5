//! Flat-rate regional tax estimate, used where a full band calculation is not
//! available for the profile's region.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{clamp_non_negative, round_money};
use crate::types::{Money, Rate, Region, TaxProfile};

const REGIONAL_DEDUCTION: Money = dec!(5000);
const REGIONAL_DEPENDENT_CREDIT: Money = dec!(1000);
const LOW_INCOME_LIMIT: Money = dec!(30000);

/// (exclusive upper bound, rate); `None` is the top tier.
const US_TIERS: [(Option<Money>, Rate); 3] = [
    (Some(dec!(50000)), dec!(0.10)),
    (Some(dec!(100000)), dec!(0.20)),
    (None, dec!(0.30)),
];
const UK_TIERS: [(Option<Money>, Rate); 2] = [(Some(dec!(40000)), dec!(0.15)), (None, dec!(0.25))];
const EU_TIERS: [(Option<Money>, Rate); 1] = [(None, dec!(0.15))];

/// Single rate applied to the whole income. Tier limits are exclusive.
pub fn regional_flat_rate(region: Region, income: Money) -> Rate {
    let tiers: &[(Option<Money>, Rate)] = match region {
        Region::Us => &US_TIERS,
        Region::Uk => &UK_TIERS,
        Region::Eu => &EU_TIERS,
    };
    tiers
        .iter()
        .find(|(limit, _)| limit.map_or(true, |l| income < l))
        .map(|(_, rate)| *rate)
        .unwrap_or(Decimal::ZERO)
}

pub fn estimate_regional_tax(income: Money, profile: &TaxProfile) -> Money {
    let mut tax = income * regional_flat_rate(profile.region, income);
    if profile.has_deductions {
        tax -= REGIONAL_DEDUCTION;
    }
    tax -= REGIONAL_DEPENDENT_CREDIT * Decimal::from(profile.dependents);
    round_money(clamp_non_negative(tax))
}

pub fn is_low_income(income: Money) -> bool {
    income < LOW_INCOME_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(region: Region, has_deductions: bool, dependents: u32) -> TaxProfile {
        TaxProfile {
            region,
            has_deductions,
            dependents,
            ..Default::default()
        }
    }

    #[test]
    fn test_us_tiers_exclusive_limits() {
        assert_eq!(regional_flat_rate(Region::Us, dec!(49_999.99)), dec!(0.10));
        assert_eq!(regional_flat_rate(Region::Us, dec!(50_000)), dec!(0.20));
        assert_eq!(regional_flat_rate(Region::Us, dec!(100_000)), dec!(0.30));
    }

    #[test]
    fn test_uk_and_eu_rates() {
        assert_eq!(regional_flat_rate(Region::Uk, dec!(39_999)), dec!(0.15));
        assert_eq!(regional_flat_rate(Region::Uk, dec!(40_000)), dec!(0.25));
        assert_eq!(regional_flat_rate(Region::Eu, dec!(1_000_000)), dec!(0.15));
    }

    #[test]
    fn test_estimate_with_credits() {
        // 80000 * 0.20 - 5000 - 2 * 1000
        let p = profile(Region::Us, true, 2);
        assert_eq!(estimate_regional_tax(dec!(80_000), &p), dec!(9_000.00));
    }

    #[test]
    fn test_estimate_clamps_at_zero() {
        // 20000 * 0.15 = 3000 < 5000 relief
        let p = profile(Region::Uk, true, 0);
        assert_eq!(estimate_regional_tax(dec!(20_000), &p), Decimal::ZERO);
    }

    #[test]
    fn test_low_income() {
        assert!(is_low_income(dec!(29_999.99)));
        assert!(!is_low_income(dec!(30_000)));
    }
}
