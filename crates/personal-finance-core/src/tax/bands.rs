//! Marginal-band arithmetic shared by income tax and National Insurance.
//!
//! Bands are filled bottom-up: each rate applies only to the slice of income
//! that falls inside its band, never to the whole income. Band edges are
//! inclusive at the top, so income exactly on a limit is charged entirely at
//! the lower band's rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::MarginalSchedule;
use crate::types::{Money, Rate};

/// Charge levied by one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandCharge {
    pub label: String,
    /// Gross income at which the band starts
    pub lower: Money,
    /// Gross income at which the band ends, if bounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    pub taxable_amount: Money,
    pub rate: Rate,
    pub charge: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCharge {
    /// Income above the zero-rate threshold
    pub taxable_income: Money,
    pub bands: Vec<BandCharge>,
    /// Sum of band charges, unrounded
    pub total: Money,
}

impl MarginalSchedule {
    pub fn apply(&self, income: Money) -> ScheduleCharge {
        let taxable_income = (income - self.threshold).max(Decimal::ZERO);
        let mut remaining = taxable_income;
        let mut lower = self.threshold;
        let mut total = Decimal::ZERO;
        let mut bands = Vec::with_capacity(self.bands.len());

        for band in &self.bands {
            let slice = match band.width {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            let charge = slice * band.rate;
            let upper = band.width.map(|w| lower + w);

            bands.push(BandCharge {
                label: band.label.clone(),
                lower,
                upper,
                taxable_amount: slice,
                rate: band.rate,
                charge,
            });

            total += charge;
            remaining -= slice;
            if let Some(u) = upper {
                lower = u;
            }
        }

        ScheduleCharge {
            taxable_income,
            bands,
            total,
        }
    }
}
