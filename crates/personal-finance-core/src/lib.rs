pub mod config;
pub mod decimal;
pub mod error;
pub mod types;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "eligibility")]
pub mod eligibility;

pub use config::TaxYearConfig;
pub use error::FinanceError;
pub use types::*;

/// Standard result type for all personal-finance operations
pub type FinanceResult<T> = Result<T, FinanceError>;
