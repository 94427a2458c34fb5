use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::types::{Money, Multiple, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// UK 2024/25 figures
// ---------------------------------------------------------------------------

pub const PERSONAL_ALLOWANCE: Money = dec!(12570);
pub const BASIC_RATE_LIMIT: Money = dec!(50270);
pub const HIGHER_RATE_LIMIT: Money = dec!(125140);

pub const BASIC_RATE: Rate = dec!(0.20);
pub const HIGHER_RATE: Rate = dec!(0.40);
pub const ADDITIONAL_RATE: Rate = dec!(0.45);

pub const DEDUCTION_RELIEF: Money = dec!(2000);
pub const CHILD_CREDIT: Money = dec!(1200);

pub const NI_PRIMARY_THRESHOLD: Money = dec!(12570);
pub const NI_UPPER_EARNINGS_LIMIT: Money = dec!(50270);
pub const NI_MAIN_RATE: Rate = dec!(0.12);
pub const NI_UPPER_RATE: Rate = dec!(0.02);

pub const MORTGAGE_INCOME_MULTIPLE: Multiple = dec!(4.5);
pub const SENIOR_UPLIFT: Multiple = dec!(1.1);
pub const MINIMUM_BALANCE_UPLIFT: Multiple = dec!(1.05);

pub const MORTGAGE_SHARE_OF_GROSS: Rate = dec!(0.30);
pub const SPEND_BUFFER: Rate = dec!(0.80);

/// Largest annual income any engine accepts.
pub const MAX_INCOME: Money = dec!(10_000_000);

/// Default rates, shared read-only by every `_with`-less entry point.
pub static UK_2024_25: LazyLock<TaxYearConfig> = LazyLock::new(TaxYearConfig::uk_2024_25);

/// Income must lie in `[0, MAX_INCOME]`.
pub fn validate_income(field: &str, value: Money) -> FinanceResult<()> {
    if value < Decimal::ZERO {
        return Err(FinanceError::invalid(field, "Cannot be negative"));
    }
    if value > MAX_INCOME {
        return Err(FinanceError::invalid(
            field,
            format!("Cannot exceed {MAX_INCOME}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule types
// ---------------------------------------------------------------------------

/// One rate band. `width: None` marks the open-ended top band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalBand {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Money>,
    pub rate: Rate,
}

impl MarginalBand {
    pub fn new(label: &str, width: Option<Money>, rate: Rate) -> Self {
        MarginalBand {
            label: label.to_string(),
            width,
            rate,
        }
    }
}

/// A zero-rate threshold followed by bands filled bottom-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalSchedule {
    pub threshold: Money,
    pub bands: Vec<MarginalBand>,
}

impl MarginalSchedule {
    pub fn validate(&self, field: &str) -> FinanceResult<()> {
        if self.threshold < Decimal::ZERO {
            return Err(FinanceError::invalid(field, "Threshold cannot be negative"));
        }
        if self.bands.is_empty() {
            return Err(FinanceError::invalid(field, "At least one band is required"));
        }
        let last = self.bands.len() - 1;
        for (i, band) in self.bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(FinanceError::invalid(
                    field,
                    format!("Band '{}' rate must be between 0 and 1", band.label),
                ));
            }
            match band.width {
                Some(w) if w <= Decimal::ZERO => {
                    return Err(FinanceError::invalid(
                        field,
                        format!("Band '{}' width must be positive", band.label),
                    ));
                }
                None if i != last => {
                    return Err(FinanceError::invalid(
                        field,
                        format!("Only the last band may be unbounded, found '{}'", band.label),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliefConfig {
    /// Flat relief when the profile claims deductions
    pub deduction_relief: Money,
    /// Credit per dependent
    pub child_credit: Money,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        ReliefConfig {
            deduction_relief: DEDUCTION_RELIEF,
            child_credit: CHILD_CREDIT,
        }
    }
}

/// Age band for the mortgage multiplier. `max_age: None` covers every older age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeMultiplier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    pub multiplier: Multiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageConfig {
    pub income_multiple: Multiple,
    /// Ascending by `max_age`; the first band containing the age applies.
    pub age_multipliers: Vec<AgeMultiplier>,
    pub senior_uplift: Multiple,
    pub minimum_balance_uplift: Multiple,
}

impl Default for MortgageConfig {
    fn default() -> Self {
        MortgageConfig {
            income_multiple: MORTGAGE_INCOME_MULTIPLE,
            age_multipliers: vec![
                AgeMultiplier {
                    max_age: Some(40),
                    multiplier: dec!(0.75),
                },
                AgeMultiplier {
                    max_age: Some(50),
                    multiplier: dec!(0.95),
                },
                AgeMultiplier {
                    max_age: None,
                    multiplier: dec!(0.85),
                },
            ],
            senior_uplift: SENIOR_UPLIFT,
            minimum_balance_uplift: MINIMUM_BALANCE_UPLIFT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingConfig {
    /// Share of gross monthly income assumed to go on a mortgage
    pub mortgage_share_of_gross: Rate,
    /// Share of what remains that may be spent
    pub spend_buffer: Rate,
}

impl Default for SpendingConfig {
    fn default() -> Self {
        SpendingConfig {
            mortgage_share_of_gross: MORTGAGE_SHARE_OF_GROSS,
            spend_buffer: SPEND_BUFFER,
        }
    }
}

/// Every rate and threshold the bracket engine reads. Fields missing from a
/// JSON override fall back to UK 2024/25.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxYearConfig {
    pub name: String,
    pub income_tax: MarginalSchedule,
    pub reliefs: ReliefConfig,
    pub national_insurance: MarginalSchedule,
    pub mortgage: MortgageConfig,
    pub spending: SpendingConfig,
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self::uk_2024_25()
    }
}

impl TaxYearConfig {
    pub fn uk_2024_25() -> Self {
        TaxYearConfig {
            name: "UK 2024/25".to_string(),
            income_tax: MarginalSchedule {
                threshold: PERSONAL_ALLOWANCE,
                bands: vec![
                    MarginalBand::new("basic", Some(BASIC_RATE_LIMIT - PERSONAL_ALLOWANCE), BASIC_RATE),
                    MarginalBand::new("higher", Some(HIGHER_RATE_LIMIT - BASIC_RATE_LIMIT), HIGHER_RATE),
                    MarginalBand::new("additional", None, ADDITIONAL_RATE),
                ],
            },
            reliefs: ReliefConfig::default(),
            national_insurance: MarginalSchedule {
                threshold: NI_PRIMARY_THRESHOLD,
                bands: vec![
                    MarginalBand::new(
                        "main",
                        Some(NI_UPPER_EARNINGS_LIMIT - NI_PRIMARY_THRESHOLD),
                        NI_MAIN_RATE,
                    ),
                    MarginalBand::new("upper", None, NI_UPPER_RATE),
                ],
            },
            mortgage: MortgageConfig::default(),
            spending: SpendingConfig::default(),
        }
    }

    /// Parse and validate a JSON override.
    pub fn from_json(json: &str) -> FinanceResult<Self> {
        let config: TaxYearConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FinanceResult<()> {
        self.income_tax.validate("income_tax")?;
        self.national_insurance.validate("national_insurance")?;

        if self.reliefs.deduction_relief < Decimal::ZERO || self.reliefs.child_credit < Decimal::ZERO {
            return Err(FinanceError::invalid("reliefs", "Reliefs cannot be negative"));
        }

        let m = &self.mortgage;
        if m.income_multiple <= Decimal::ZERO {
            return Err(FinanceError::invalid(
                "mortgage.income_multiple",
                "Income multiple must be positive",
            ));
        }
        if m.senior_uplift <= Decimal::ZERO || m.minimum_balance_uplift <= Decimal::ZERO {
            return Err(FinanceError::invalid(
                "mortgage",
                "Uplift multipliers must be positive",
            ));
        }
        if m.age_multipliers.is_empty() {
            return Err(FinanceError::invalid(
                "mortgage.age_multipliers",
                "At least one age band is required",
            ));
        }
        if m.age_multipliers.last().and_then(|b| b.max_age).is_some() {
            return Err(FinanceError::invalid(
                "mortgage.age_multipliers",
                "The last age band must be open-ended",
            ));
        }
        let mut previous: Option<u32> = None;
        for band in &m.age_multipliers {
            if band.multiplier <= Decimal::ZERO {
                return Err(FinanceError::invalid(
                    "mortgage.age_multipliers",
                    "Multipliers must be positive",
                ));
            }
            if let Some(max_age) = band.max_age {
                if previous.is_some_and(|p| max_age <= p) {
                    return Err(FinanceError::invalid(
                        "mortgage.age_multipliers",
                        "Age bands must be strictly ascending",
                    ));
                }
                previous = Some(max_age);
            }
        }

        let s = &self.spending;
        for (name, value) in [
            ("spending.mortgage_share_of_gross", s.mortgage_share_of_gross),
            ("spending.spend_buffer", s.spend_buffer),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(FinanceError::invalid(name, "Must be between 0 and 1"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_bounds_inclusive() {
        assert!(validate_income("salary", Decimal::ZERO).is_ok());
        assert!(validate_income("salary", MAX_INCOME).is_ok());
        assert!(validate_income("salary", dec!(-0.01)).is_err());
        match validate_income("salary", MAX_INCOME + dec!(0.01)).unwrap_err() {
            FinanceError::InvalidInput { field, .. } => assert_eq!(field, "salary"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TaxYearConfig::default().validate().is_ok());
        assert_eq!(UK_2024_25.income_tax.bands[0].width, Some(dec!(37700)));
        assert_eq!(UK_2024_25.income_tax.bands[1].width, Some(dec!(74870)));
    }

    #[test]
    fn test_partial_json_override_keeps_defaults() {
        let config = TaxYearConfig::from_json(r#"{"name": "custom", "reliefs": {"deduction_relief": "0", "child_credit": "500"}}"#)
            .unwrap();
        assert_eq!(config.name, "custom");
        assert_eq!(config.reliefs.child_credit, dec!(500));
        assert_eq!(config.income_tax, UK_2024_25.income_tax);
    }

    #[test]
    fn test_unbounded_middle_band_rejected() {
        let mut config = TaxYearConfig::default();
        config.income_tax.bands[0].width = None;
        let err = config.validate().unwrap_err();
        match err {
            FinanceError::InvalidInput { field, .. } => assert_eq!(field, "income_tax"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let mut config = TaxYearConfig::default();
        config.national_insurance.bands[1].rate = dec!(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_descending_age_bands_rejected() {
        let mut config = TaxYearConfig::default();
        config.mortgage.age_multipliers[1].max_age = Some(30);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = TaxYearConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FinanceError::SerializationError(_)));
    }
}
