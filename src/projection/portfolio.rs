//! Portfolio valuation: compounds net returns and monthly contributions

use serde::{Deserialize, Deserializer, Serialize};

use super::records::MonthlyPlan;
use crate::error::ComputationError;

/// Portfolio position at the end of a month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub month: u32,
    pub value: f64,
    /// Sum of all contributions so far, excluding growth
    pub contributed: f64,
    /// Value above contributions, floored at zero
    pub gains: f64,
    /// Contribution made this month
    pub investment: f64,
}

/// Snapshots aligned month for month with a [`MonthlyPlan`], kept in month order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PortfolioValuation {
    snapshots: Vec<PortfolioSnapshot>,
}

impl From<Vec<PortfolioSnapshot>> for PortfolioValuation {
    fn from(mut snapshots: Vec<PortfolioSnapshot>) -> Self {
        snapshots.sort_by_key(|s| s.month);
        Self { snapshots }
    }
}

impl<'de> Deserialize<'de> for PortfolioValuation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<PortfolioSnapshot>::deserialize(deserializer).map(Self::from)
    }
}

impl PortfolioValuation {
    pub fn snapshots(&self) -> &[PortfolioSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&PortfolioSnapshot> {
        self.snapshots.last()
    }

    /// Snapshot for a given month, if valued
    pub fn month(&self, month: u32) -> Option<&PortfolioSnapshot> {
        self.snapshots
            .binary_search_by_key(&month, |s| s.month)
            .ok()
            .map(|idx| &self.snapshots[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PortfolioSnapshot> {
        self.snapshots.iter()
    }
}

/// Monthly growth rate after fees, from annual percentages
pub fn monthly_rate(annual_return_percent: f64, annual_fee_percent: f64) -> f64 {
    let net_annual_return = annual_return_percent - annual_fee_percent;
    net_annual_return / 100.0 / 12.0
}

/// Value the portfolio built by the plan's monthly investments.
///
/// Each month the previous value grows by the monthly rate and then this
/// month's investment is added: `value[n] = value[n-1] * (1 + r) + investment[n]`.
/// Fails on the first month whose value leaves the finite range.
pub fn value_portfolio(
    plan: &MonthlyPlan,
    annual_return_percent: f64,
    annual_fee_percent: f64,
) -> Result<PortfolioValuation, ComputationError> {
    let rate = monthly_rate(annual_return_percent, annual_fee_percent);

    let mut value = 0.0;
    let mut contributed = 0.0;
    let mut snapshots = Vec::with_capacity(plan.len());
    for record in plan {
        let grown = value * (1.0 + rate);
        value = grown + record.investment;
        contributed += record.investment;

        let snapshot = PortfolioSnapshot {
            month: record.month,
            value,
            contributed,
            gains: (value - contributed).max(0.0),
            investment: record.investment,
        };
        check_snapshot(&snapshot)?;
        snapshots.push(snapshot);
    }

    Ok(PortfolioValuation { snapshots })
}

fn check_snapshot(snapshot: &PortfolioSnapshot) -> Result<(), ComputationError> {
    let fields = [
        ("portfolio value", snapshot.value),
        ("contributed", snapshot.contributed),
        ("gains", snapshot.gains),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(ComputationError::NonFinite {
            field: *field,
            month: snapshot.month,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::MonthlyRecord;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn constant_plan(months: u32, investment: f64) -> MonthlyPlan {
        (0..months)
            .map(|month| MonthlyRecord {
                month,
                salary: 0.0,
                expenses: 0.0,
                net_savings: 0.0,
                investment,
                cumulative_savings: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_monthly_rate_is_net_of_fees() {
        assert_relative_eq!(monthly_rate(8.5, 0.42), 8.08 / 1200.0, max_relative = 1e-12);
        assert_eq!(monthly_rate(5.0, 5.0), 0.0);
    }

    #[test]
    fn test_matches_geometric_series() {
        let x = 250.0;
        let n = 120;
        let valuation = value_portfolio(&constant_plan(n, x), 7.0, 1.0).unwrap();
        let r = monthly_rate(7.0, 1.0);

        // n contributions, the first compounding n-1 times
        let closed_form = x * ((1.0 + r).powi(n as i32) - 1.0) / r;
        let last = valuation.last().unwrap();
        assert_relative_eq!(last.value, closed_form, max_relative = 1e-12);
        assert_relative_eq!(last.contributed, x * n as f64);
        assert_relative_eq!(last.gains, closed_form - x * n as f64, max_relative = 1e-9);
    }

    #[test]
    fn test_recurrence_holds_each_month() {
        let valuation = value_portfolio(&constant_plan(24, 100.0), 6.0, 0.0).unwrap();
        let r = 0.005;
        let mut previous = 0.0;
        for snapshot in valuation.iter() {
            assert_abs_diff_eq!(snapshot.value, previous * (1.0 + r) + 100.0, epsilon = 1e-9);
            previous = snapshot.value;
        }
    }

    #[test]
    fn test_gains_floored_at_zero() {
        // fee above return shrinks the value below contributions
        let valuation = value_portfolio(&constant_plan(12, 100.0), 1.0, 5.0).unwrap();
        let last = valuation.last().unwrap();
        assert!(last.value < last.contributed);
        assert_eq!(last.gains, 0.0);
    }

    #[test]
    fn test_snapshots_aligned_with_plan() {
        let plan = constant_plan(30, 50.0);
        let valuation = value_portfolio(&plan, 8.5, 0.42).unwrap();
        assert_eq!(valuation.len(), plan.len());
        for (record, snapshot) in plan.iter().zip(valuation.iter()) {
            assert_eq!(record.month, snapshot.month);
            assert_eq!(record.investment, snapshot.investment);
        }
        assert_eq!(valuation.month(12).unwrap().month, 12);
        assert!(valuation.month(30).is_none());
    }

    #[test]
    fn test_overflow_is_a_computation_error() {
        let err = value_portfolio(&constant_plan(240, 1e305), 49.0, 0.0).unwrap_err();
        match err {
            ComputationError::NonFinite { field, month } => {
                assert_eq!(field, "portfolio value");
                assert!(month < 240);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_restores_month_order() {
        let json = r#"[
            {"month": 1, "value": 20.0, "contributed": 20.0, "gains": 0.0, "investment": 10.0},
            {"month": 0, "value": 10.0, "contributed": 10.0, "gains": 0.0, "investment": 10.0}
        ]"#;
        let valuation: PortfolioValuation = serde_json::from_str(json).unwrap();
        assert_eq!(valuation.snapshots()[0].month, 0);
        assert_eq!(valuation.month(1).unwrap().value, 20.0);
    }
}
