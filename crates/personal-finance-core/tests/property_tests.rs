use personal_finance_core::decimal::{to_decimal_fraction, to_percent};
use personal_finance_core::mortgage::{lending, spend};
use personal_finance_core::risk::score::{self, RISK_SCORE_MAX, RISK_SCORE_MIN};
use personal_finance_core::tax::{income_tax, national_insurance, take_home};
use personal_finance_core::TaxProfile;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;

fn pounds(pence: u64) -> Decimal {
    Decimal::new(pence as i64, 2)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn prop_no_income_tax_within_allowance(
        pence in 0u64..=1_257_000,
        has_deductions in proptest::bool::ANY,
        dependents in 0u32..=20,
    ) {
        prop_assert_eq!(
            income_tax::calculate_income_tax(pounds(pence), has_deductions, dependents),
            Decimal::ZERO
        );
    }

    #[test]
    fn prop_tax_and_ni_never_negative(
        pence in 0u64..1_000_000_000,
        has_deductions in proptest::bool::ANY,
        dependents in 0u32..=20,
    ) {
        let salary = pounds(pence);
        prop_assert!(income_tax::calculate_income_tax(salary, has_deductions, dependents) >= Decimal::ZERO);
        prop_assert!(national_insurance::calculate_national_insurance(salary) >= Decimal::ZERO);
        let profile = TaxProfile::uk(has_deductions, dependents);
        prop_assert!(spend::calculate_maximum_monthly_spend(salary, &profile) >= Decimal::ZERO);
        prop_assert!(take_home::calculate_disposable_income(salary, &profile) <= salary);
    }

    #[test]
    fn prop_income_tax_non_decreasing(
        pence in 0u64..50_000_000,
        raise in 0u64..5_000_000,
        has_deductions in proptest::bool::ANY,
        dependents in 0u32..=20,
    ) {
        let lower = income_tax::calculate_income_tax(pounds(pence), has_deductions, dependents);
        let higher = income_tax::calculate_income_tax(pounds(pence + raise), has_deductions, dependents);
        prop_assert!(lower <= higher, "{} then {}", lower, higher);
    }

    #[test]
    fn prop_risk_score_bounded(
        age in 0i32..=200,
        income in 0u64..=10_000_000,
        net_worth in 0u64..=10_000_000,
        tax_rate_bp in 0u32..=10_000,
    ) {
        let s = score::calculate_risk_score(
            age,
            Decimal::from(income),
            Decimal::from(net_worth),
            Decimal::new(i64::from(tax_rate_bp), 4),
        )
        .unwrap();
        prop_assert!((RISK_SCORE_MIN..=RISK_SCORE_MAX).contains(&s));
    }

    #[test]
    fn prop_percent_round_trip(mantissa in -1_000_000_000i64..1_000_000_000, scale in 0u32..=6) {
        let x = Decimal::new(mantissa, scale);
        prop_assert_eq!(to_percent(to_decimal_fraction(x)), x);
    }

    #[test]
    fn prop_calculations_idempotent(
        pence in 0u64..100_000_000,
        age in 18u32..=90,
        is_senior in proptest::bool::ANY,
        has_minimum_balance in proptest::bool::ANY,
    ) {
        let salary = pounds(pence);
        let profile = TaxProfile::default();
        prop_assert_eq!(
            take_home::calculate_effective_tax_rate(salary, &profile),
            take_home::calculate_effective_tax_rate(salary, &profile)
        );
        let first = lending::calculate_maximum_mortgage(salary, age, is_senior, has_minimum_balance);
        let second = lending::calculate_maximum_mortgage(salary, age, is_senior, has_minimum_balance);
        prop_assert_eq!(first.serialize(), second.serialize());
    }
}

#[test]
fn test_risk_score_extremes() {
    for (age, income) in [(0, 0u64), (200, 0), (0, 10_000_000), (200, 10_000_000)] {
        let s = score::calculate_risk_score(age, Decimal::from(income), Decimal::ZERO, Decimal::ZERO)
            .unwrap();
        assert!((RISK_SCORE_MIN..=RISK_SCORE_MAX).contains(&s), "age {age} income {income}");
    }
}
