//! Checks a client's chosen allocation against the recommended ranges.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::decimal::{is_inclusive_between, not_equal};
use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationWeight {
    pub category: String,
    /// Fraction of the portfolio (0.25 = 25%)
    pub weight: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedRange {
    pub category: String,
    pub min: Rate,
    pub max: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationCheckInput {
    pub allocation: Vec<AllocationWeight>,
    /// Empty skips the range check
    #[serde(default)]
    pub recommendation: Vec<RecommendedRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationCheckOutput {
    pub total_weight: Rate,
    pub categories: usize,
    pub ranges_checked: bool,
    pub valid: bool,
}

/// Weights must sum to exactly one.
pub fn validate_allocation_sum(allocation: &[AllocationWeight]) -> FinanceResult<Rate> {
    let total: Rate = allocation.iter().map(|a| a.weight).sum();
    if not_equal(total, Decimal::ONE) {
        return Err(FinanceError::PercentSumMismatch { total });
    }
    Ok(total)
}

/// Every weight must lie inside its category's inclusive range.
pub fn validate_allocation_ranges(
    allocation: &[AllocationWeight],
    recommendation: &[RecommendedRange],
) -> FinanceResult<()> {
    for item in allocation {
        let range = recommendation
            .iter()
            .find(|r| r.category == item.category)
            .ok_or_else(|| {
                FinanceError::invalid(&item.category, "No recommended range for this category")
            })?;

        if !is_inclusive_between(item.weight, range.min, range.max) {
            return Err(FinanceError::SelectionOutOfRange {
                category: item.category.clone(),
                value: item.weight,
                min: range.min,
                max: range.max,
            });
        }
    }
    Ok(())
}

pub fn validate_allocation(
    input: &AllocationCheckInput,
) -> FinanceResult<ComputationOutput<AllocationCheckOutput>> {
    let start = Instant::now();

    if input.allocation.is_empty() {
        return Err(FinanceError::invalid(
            "allocation",
            "At least one category is required",
        ));
    }

    let total_weight = validate_allocation_sum(&input.allocation)?;
    let ranges_checked = !input.recommendation.is_empty();
    if ranges_checked {
        validate_allocation_ranges(&input.allocation, &input.recommendation)?;
    }

    let output = AllocationCheckOutput {
        total_weight,
        categories: input.allocation.len(),
        ranges_checked,
        valid: true,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Allocation check: weights sum to one and each lies within its recommended range",
        &serde_json::json!({
            "categories": input.allocation.iter().map(|a| a.category.as_str()).collect::<Vec<_>>(),
            "recommended_categories": input.recommendation.len(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}
