//! Year-mark projection summaries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::portfolio::PortfolioValuation;
use crate::error::ComputationError;

/// Fixed annual rate behind the fee estimate.
///
/// This is deliberately not the fund's configured fee: summaries always
/// estimate fees at 0.42% per year of contributed capital, whatever fee the
/// valuation was run with.
pub const FEE_ESTIMATE_RATE: f64 = 0.0042;

/// A horizon reported in the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMark {
    pub years: u32,
    pub months: u32,
}

impl YearMark {
    pub const fn new(years: u32) -> Self {
        Self {
            years,
            months: years * 12,
        }
    }
}

/// 5, 10 and 20 years
pub const DEFAULT_YEAR_MARKS: [YearMark; 3] =
    [YearMark::new(5), YearMark::new(10), YearMark::new(20)];

/// Portfolio figures at a year mark, rounded to whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    /// Month actually read, earlier than the mark when the horizon is shorter
    pub months: u32,
    pub contributed: f64,
    pub gains: f64,
    pub value: f64,
    pub estimated_fees: f64,
}

/// Summaries keyed by year mark
pub type Projections = BTreeMap<u32, ProjectionSummary>;

/// Summarize the valuation at each year mark.
///
/// Marks past the end of the valuation read the last available month.
pub fn summarize(
    valuation: &PortfolioValuation,
    year_marks: &[YearMark],
    fee_estimate_rate: f64,
) -> Result<Projections, ComputationError> {
    let mut projections = Projections::new();

    for mark in year_marks {
        let last_month = valuation
            .last()
            .map(|s| s.month)
            .ok_or(ComputationError::MissingMonth(mark.months))?;
        let month = mark.months.min(last_month);
        let snapshot = valuation
            .month(month)
            .ok_or(ComputationError::MissingMonth(month))?;

        let estimated_fees = snapshot.contributed * fee_estimate_rate * mark.years as f64;

        projections.insert(
            mark.years,
            ProjectionSummary {
                years: mark.years,
                months: snapshot.month,
                contributed: snapshot.contributed.round(),
                gains: snapshot.gains.round(),
                value: snapshot.value.round(),
                estimated_fees: estimated_fees.round(),
            },
        );
    }

    Ok(projections)
}
