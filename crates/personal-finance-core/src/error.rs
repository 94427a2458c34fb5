use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Allocation weights sum to {total}, expected exactly 1")]
    PercentSumMismatch { total: Decimal },

    #[error("Allocation for {category} of {value} is outside the recommended range [{min}, {max}]")]
    SelectionOutOfRange {
        category: String,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinanceError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinanceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(e: serde_json::Error) -> Self {
        FinanceError::SerializationError(e.to_string())
    }
}
