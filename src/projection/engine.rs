//! Month-by-month savings simulation

use log::debug;

use super::records::{MonthlyPlan, MonthlyRecord};
use super::state::SimulationState;
use super::summary::{YearMark, DEFAULT_YEAR_MARKS, FEE_ESTIMATE_RATE};
use crate::allocation::AllocationPolicy;
use crate::error::ComputationError;
use crate::plan::{PlanInput, DEFAULT_HORIZON_MONTHS};
use crate::timeline::Timeline;

/// Longest horizon the engine will simulate (100 years)
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Last simulated month; months 0..=horizon_months are produced
    pub horizon_months: u32,

    /// Investment allocation rules
    pub allocation: AllocationPolicy,

    /// Year marks reported by the projection summary
    pub year_marks: Vec<YearMark>,

    /// Flat annual rate used for the fee estimate in summaries
    pub fee_estimate_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS, // 20 years
            allocation: AllocationPolicy::default(),
            year_marks: DEFAULT_YEAR_MARKS.to_vec(),
            fee_estimate_rate: FEE_ESTIMATE_RATE,
        }
    }
}

impl SimulationConfig {
    /// Copy of this config with the plan's horizon override applied
    pub fn for_plan(&self, plan: &PlanInput) -> Self {
        Self {
            horizon_months: plan.horizon_months.unwrap_or(self.horizon_months),
            ..self.clone()
        }
    }
}

/// Lazy sequence of monthly records for one plan
pub struct MonthlyRecords<'a> {
    timeline: Timeline,
    policy: &'a AllocationPolicy,
    state: SimulationState,
    horizon_months: u32,
}

impl Iterator for MonthlyRecords<'_> {
    type Item = MonthlyRecord;

    fn next(&mut self) -> Option<MonthlyRecord> {
        let month = self.state.month;
        if month > self.horizon_months {
            return None;
        }
        let salary = self.timeline.salary_at(month);
        let expenses = self.timeline.expenses_at(month);
        Some(self.state.step(salary, expenses, self.policy))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining =
            (self.horizon_months as usize + 1).saturating_sub(self.state.month as usize);
        (remaining, Some(remaining))
    }
}

/// Simulation engine
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Lazily produce the records for months 0..=horizon in ascending order.
    /// The horizon is capped at [`MAX_HORIZON_MONTHS`].
    pub fn records<'a>(&'a self, plan: &PlanInput) -> MonthlyRecords<'a> {
        MonthlyRecords {
            timeline: Timeline::new(&plan.income_changes, &plan.expense_periods),
            policy: &self.config.allocation,
            state: SimulationState::new(),
            horizon_months: self.config.horizon_months.min(MAX_HORIZON_MONTHS),
        }
    }

    /// Run the full horizon and materialize the monthly plan
    pub fn simulate(&self, plan: &PlanInput) -> Result<MonthlyPlan, ComputationError> {
        if self.config.horizon_months > MAX_HORIZON_MONTHS {
            return Err(ComputationError::HorizonTooLong(self.config.horizon_months));
        }

        let mut monthly = MonthlyPlan::new();
        for record in self.records(plan) {
            check_record(&record)?;
            monthly.push(record);
        }

        debug!(
            "simulated {} months, cumulative savings {:.2}",
            monthly.len(),
            monthly.last().map(|r| r.cumulative_savings).unwrap_or(0.0)
        );
        Ok(monthly)
    }
}

fn check_record(record: &MonthlyRecord) -> Result<(), ComputationError> {
    let fields = [
        ("salary", record.salary),
        ("expenses", record.expenses),
        ("net savings", record.net_savings),
        ("investment", record.investment),
        ("cumulative savings", record.cumulative_savings),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(ComputationError::NonFinite {
            field: *field,
            month: record.month,
        }),
        None => Ok(()),
    }
}
