use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.20 = 20%). Never as percentages.
pub type Rate = Decimal;

/// Multipliers applied to a base amount (e.g. 4.5x salary)
pub type Multiple = Decimal;

/// Tax jurisdiction of a profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    #[default]
    Uk,
    Us,
    Eu,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uk => write!(f, "UK"),
            Self::Us => write!(f, "US"),
            Self::Eu => write!(f, "EU"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHousehold,
}

/// A named deduction claimed against tax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxDeduction {
    pub kind: String,
    pub amount: Money,
    #[serde(default)]
    pub verified: bool,
}

/// Already-validated tax facts for one taxpayer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxProfile {
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub dependents: u32,
    #[serde(default)]
    pub has_deductions: bool,
    #[serde(default)]
    pub filing_status: FilingStatus,
    #[serde(default)]
    pub deductions: Vec<TaxDeduction>,
    #[serde(default)]
    pub self_employed: bool,
}

impl TaxProfile {
    /// Single UK filer with the given reliefs and no named deductions.
    pub fn uk(has_deductions: bool, dependents: u32) -> Self {
        TaxProfile {
            has_deductions,
            dependents,
            ..Default::default()
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
