//! Monthly investment allocation policy

use serde::{Deserialize, Serialize};

/// Rules deciding how much of a month's net savings is invested.
///
/// The rate depends on whether accumulated savings already cover the emergency
/// fund (`emergency_multiple` months of the current expenses). The result is
/// clamped by `max(raw, floor)` and then `min(.., ceiling)`, so when the ceiling
/// falls below the floor the ceiling wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPolicy {
    /// Months of expenses that make up the emergency fund
    pub emergency_multiple: f64,
    /// Share of net savings invested while the emergency fund is incomplete
    pub building_rate: f64,
    /// Share of net savings invested once the emergency fund is covered
    pub funded_rate: f64,
    /// Minimum monthly investment
    pub floor: f64,
    /// Maximum share of net savings that may be invested
    pub ceiling_share: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            emergency_multiple: 3.0,
            building_rate: 0.30,
            funded_rate: 0.60,
            floor: 25.0,
            ceiling_share: 0.65,
        }
    }
}

impl AllocationPolicy {
    /// Emergency fund target for a given monthly expense level
    pub fn emergency_target(&self, expenses: f64) -> f64 {
        expenses * self.emergency_multiple
    }

    /// Amount to invest this month. `cumulative_savings` is the running total
    /// before this month's net savings are added.
    pub fn compute_investment(&self, salary: f64, expenses: f64, cumulative_savings: f64) -> f64 {
        let net_savings = salary - expenses;
        if net_savings <= 0.0 {
            return 0.0;
        }

        let has_emergency = cumulative_savings >= self.emergency_target(expenses);
        let rate = if has_emergency {
            self.funded_rate
        } else {
            self.building_rate
        };
        let raw = net_savings * rate;

        let ceiling = net_savings * self.ceiling_share;
        raw.max(self.floor).min(ceiling)
    }
}

/// [`AllocationPolicy::compute_investment`] under the default policy
pub fn compute_investment(salary: f64, expenses: f64, cumulative_savings: f64) -> f64 {
    AllocationPolicy::default().compute_investment(salary, expenses, cumulative_savings)
}
