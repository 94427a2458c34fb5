//! Exact decimal comparison, rounding and formatting helpers shared by every
//! engine. All comparisons are numeric, so `1.0` and `1.00` are equal.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Scale of every public monetary output.
pub const MONEY_DP: u32 = 2;

/// Scale carried by intermediate divisions.
pub const INTERMEDIATE_DP: u32 = 4;

const HUNDRED: Decimal = dec!(100);

pub fn equal(a: Decimal, b: Decimal) -> bool {
    a == b
}

pub fn not_equal(a: Decimal, b: Decimal) -> bool {
    a != b
}

pub fn greater_than(a: Decimal, b: Decimal) -> bool {
    a > b
}

pub fn greater_or_equal(a: Decimal, b: Decimal) -> bool {
    a >= b
}

pub fn less_than(a: Decimal, b: Decimal) -> bool {
    a < b
}

pub fn less_or_equal(a: Decimal, b: Decimal) -> bool {
    a <= b
}

/// True iff `floor <= a <= ceiling`.
pub fn is_inclusive_between(a: Decimal, floor: Decimal, ceiling: Decimal) -> bool {
    greater_or_equal(a, floor) && less_or_equal(a, ceiling)
}

/// Thousands-grouped amount with exactly two decimals, truncated toward zero.
///
/// `12345.678` formats as `12,345.67`; `-1234.567` as `-1,234.56`.
pub fn format_amount(a: Decimal) -> String {
    let mut truncated = a.round_dp_with_strategy(MONEY_DP, RoundingStrategy::ToZero);
    if truncated.is_zero() {
        truncated.set_sign_positive(true);
    }
    truncated.rescale(MONEY_DP);

    let text = truncated.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if truncated.is_sign_negative() { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Percent to fraction: `20 -> 0.20`.
pub fn to_decimal_fraction(percent: Decimal) -> Rate {
    percent / HUNDRED
}

/// Fraction to percent: `0.20 -> 20`.
pub fn to_percent(fraction: Rate) -> Decimal {
    fraction * HUNDRED
}

/// Round half-up to `dp` places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary output to pence, half-up.
pub fn round_money(value: Money) -> Money {
    round_half_up(value, MONEY_DP)
}

/// Round an intermediate quotient to four places, half-up.
pub fn round_intermediate(value: Decimal) -> Decimal {
    round_half_up(value, INTERMEDIATE_DP)
}

/// Zero for any negative figure.
pub fn clamp_non_negative(value: Money) -> Money {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparisons_ignore_scale() {
        assert!(equal(dec!(1.0), dec!(1.00)));
        assert!(!not_equal(dec!(1.0), dec!(1.00)));
        assert!(greater_than(dec!(1.01), dec!(1)));
        assert!(greater_or_equal(dec!(1), dec!(1.000)));
        assert!(less_than(dec!(-0.5), dec!(0)));
        assert!(less_or_equal(dec!(2.50), dec!(2.5)));
    }

    #[test]
    fn test_inclusive_between_includes_both_ends() {
        assert!(is_inclusive_between(dec!(0.10), dec!(0.10), dec!(0.30)));
        assert!(is_inclusive_between(dec!(0.30), dec!(0.10), dec!(0.30)));
        assert!(!is_inclusive_between(dec!(0.3001), dec!(0.10), dec!(0.30)));
        assert!(!is_inclusive_between(dec!(0.0999), dec!(0.10), dec!(0.30)));
    }

    #[test]
    fn test_format_amount_truncates() {
        assert_eq!(format_amount(dec!(12345.678)), "12,345.67");
        assert_eq!(format_amount(dec!(0.999)), "0.99");
        assert_eq!(format_amount(dec!(1234567)), "1,234,567.00");
        assert_eq!(format_amount(dec!(100)), "100.00");
        assert_eq!(format_amount(dec!(999.5)), "999.50");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(dec!(-1234.567)), "-1,234.56");
        assert_eq!(format_amount(dec!(-0.004)), "0.00");
    }

    #[test]
    fn test_percent_conversions() {
        assert_eq!(to_decimal_fraction(dec!(20)), dec!(0.20));
        assert_eq!(to_percent(dec!(0.45)), dec!(45));
        assert_eq!(to_percent(to_decimal_fraction(dec!(12.345))), dec!(12.345));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
        assert_eq!(round_intermediate(dec!(0.38115)), dec!(0.3812));
    }
}
