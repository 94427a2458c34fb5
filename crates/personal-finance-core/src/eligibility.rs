//! Mortgage and opportunity gates over already-validated facts.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinanceResult;

pub const ADULT_AGE: u32 = 18;
pub const RETIREMENT_AGE: u32 = 66;
pub const MINIMUM_MORTGAGE_SALARY: Money = dec!(20000);
pub const LOW_INCOME_WITH_DEFAULTS: Money = dec!(30000);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityFacts {
    pub age: u32,
    pub salary: Money,
    #[serde(default)]
    pub is_overdrawn: bool,
    #[serde(default)]
    pub employment_verified: bool,
    #[serde(default)]
    pub insurance_active: bool,
    #[serde(default)]
    pub has_recent_defaults: bool,
}

impl EligibilityFacts {
    pub fn is_adult(&self) -> bool {
        self.age >= ADULT_AGE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MortgageBlocker {
    NotAdult,
    Overdrawn,
    SalaryBelowMinimum,
    AtOrOverRetirementAge,
}

impl std::fmt::Display for MortgageBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAdult => write!(f, "Applicant must be {ADULT_AGE} or over"),
            Self::Overdrawn => write!(f, "Account is overdrawn"),
            Self::SalaryBelowMinimum => {
                write!(f, "Salary is below the minimum of {MINIMUM_MORTGAGE_SALARY}")
            }
            Self::AtOrOverRetirementAge => {
                write!(f, "Applicant must be under retirement age ({RETIREMENT_AGE})")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityBlocker {
    NotAdult,
    EmploymentUnverified,
    DefaultsWithLowIncome,
    InsuranceInactive,
}

impl std::fmt::Display for OpportunityBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAdult => write!(f, "Person must be an adult ({ADULT_AGE}+)"),
            Self::EmploymentUnverified => write!(f, "Employment must be verified"),
            Self::DefaultsWithLowIncome => write!(
                f,
                "Recent defaults with salary below {LOW_INCOME_WITH_DEFAULTS}"
            ),
            Self::InsuranceInactive => write!(f, "Active insurance is required"),
        }
    }
}

/// Failed mortgage preconditions, in check order.
pub fn mortgage_blockers(facts: &EligibilityFacts) -> Vec<MortgageBlocker> {
    let mut blockers = Vec::new();
    if !facts.is_adult() {
        blockers.push(MortgageBlocker::NotAdult);
    }
    if facts.is_overdrawn {
        blockers.push(MortgageBlocker::Overdrawn);
    }
    if facts.salary < MINIMUM_MORTGAGE_SALARY {
        blockers.push(MortgageBlocker::SalaryBelowMinimum);
    }
    if facts.age >= RETIREMENT_AGE {
        blockers.push(MortgageBlocker::AtOrOverRetirementAge);
    }
    blockers
}

pub fn qualifies_for_mortgage(facts: &EligibilityFacts) -> bool {
    mortgage_blockers(facts).is_empty()
}

/// Failed opportunity preconditions, in check order.
pub fn opportunity_blockers(facts: &EligibilityFacts) -> Vec<OpportunityBlocker> {
    let mut blockers = Vec::new();
    if !facts.is_adult() {
        blockers.push(OpportunityBlocker::NotAdult);
    }
    if !facts.employment_verified {
        blockers.push(OpportunityBlocker::EmploymentUnverified);
    }
    if facts.has_recent_defaults && facts.salary < LOW_INCOME_WITH_DEFAULTS {
        blockers.push(OpportunityBlocker::DefaultsWithLowIncome);
    }
    if !facts.insurance_active {
        blockers.push(OpportunityBlocker::InsuranceInactive);
    }
    blockers
}

pub fn opportunity_is_creatable(facts: &EligibilityFacts) -> bool {
    opportunity_blockers(facts).is_empty()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityOutput {
    pub qualifies_for_mortgage: bool,
    pub mortgage_blockers: Vec<MortgageBlocker>,
    pub opportunity_creatable: bool,
    pub opportunity_blockers: Vec<OpportunityBlocker>,
}

pub fn evaluate_eligibility(
    facts: &EligibilityFacts,
) -> FinanceResult<ComputationOutput<EligibilityOutput>> {
    let start = Instant::now();

    let mortgage = mortgage_blockers(facts);
    let opportunity = opportunity_blockers(facts);

    tracing::debug!(
        age = facts.age,
        salary = %facts.salary,
        mortgage_blockers = mortgage.len(),
        opportunity_blockers = opportunity.len(),
        "evaluated eligibility"
    );

    let warnings: Vec<String> = mortgage
        .iter()
        .map(ToString::to_string)
        .chain(opportunity.iter().map(ToString::to_string))
        .collect();

    let output = EligibilityOutput {
        qualifies_for_mortgage: mortgage.is_empty(),
        mortgage_blockers: mortgage,
        opportunity_creatable: opportunity.is_empty(),
        opportunity_blockers: opportunity,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Eligibility gates: mortgage qualification and opportunity creation preconditions",
        facts,
        warnings,
        elapsed,
        output,
    ))
}
