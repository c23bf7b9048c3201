//! Scenario runner for batch simulations
//!
//! Holds one base configuration and runs many plans, or one plan under many
//! return assumptions, in parallel.

use rayon::prelude::*;

use crate::error::SimulationError;
use crate::plan::{InvestmentConfig, PlanInput};
use crate::projection::SimulationConfig;
use crate::simulation::{run_simulation_with, SimulationReport};

/// Outcome of one point of a return sweep
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub annual_return_percent: f64,
    pub result: Result<SimulationReport, SimulationError>,
}

/// Batch runner sharing a base configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for point in runner.run_return_sweep(&plan, &[4.0, 6.0, 8.0]) {
///     println!("{}% => {:?}", point.annual_return_percent, point.result.is_ok());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_config: SimulationConfig,
}

impl ScenarioRunner {
    /// Create runner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a custom base configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { base_config: config }
    }

    /// Run a single plan
    pub fn run(&self, plan: &PlanInput) -> Result<SimulationReport, SimulationError> {
        run_simulation_with(plan, &self.base_config)
    }

    /// Run several plans in parallel; results keep the input order
    pub fn run_batch(&self, plans: &[PlanInput]) -> Vec<Result<SimulationReport, SimulationError>> {
        plans.par_iter().map(|plan| self.run(plan)).collect()
    }

    /// Run one plan under each annual return, keeping the plan's fee
    pub fn run_return_sweep(&self, plan: &PlanInput, annual_returns: &[f64]) -> Vec<SweepPoint> {
        annual_returns
            .par_iter()
            .map(|&rate| {
                let variant = plan.with_investment(InvestmentConfig {
                    annual_return_percent: rate,
                    ..plan.investment.clone()
                });
                SweepPoint {
                    annual_return_percent: rate,
                    result: self.run(&variant),
                }
            })
            .collect()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ExpenseItem, ExpenseMode};

    fn test_plan() -> PlanInput {
        PlanInput::default()
            .with_initial_salary(1900.0)
            .with_expense_mode(ExpenseMode::Simple)
            .with_expense_period(0, vec![ExpenseItem::new("Total", 1250.0)])
    }

    #[test]
    fn test_return_sweep_ordered_and_monotonic() {
        let runner = ScenarioRunner::new();
        let rates = [3.0, 5.0, 7.0, 9.0];
        let points = runner.run_return_sweep(&test_plan(), &rates);

        assert_eq!(points.len(), 4);
        let values: Vec<f64> = points
            .iter()
            .map(|p| p.result.as_ref().unwrap().projections[&20].value)
            .collect();
        for (point, rate) in points.iter().zip(rates) {
            assert_eq!(point.annual_return_percent, rate);
        }
        // Higher return should result in higher final value
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_sweep_reports_invalid_rates() {
        let runner = ScenarioRunner::new();
        let points = runner.run_return_sweep(&test_plan(), &[6.0, 55.0]);
        assert!(points[0].result.is_ok());
        assert!(matches!(points[1].result, Err(SimulationError::Validation(_))));
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::with_config(SimulationConfig {
            horizon_months: 120,
            ..Default::default()
        });
        let plans = vec![test_plan(), test_plan().with_initial_salary(2500.0)];
        let batch = runner.run_batch(&plans);

        assert_eq!(batch.len(), 2);
        for (plan, result) in plans.iter().zip(&batch) {
            assert_eq!(result, &runner.run(plan));
        }
        assert_eq!(batch[0].as_ref().unwrap().monthly_plan.len(), 121);
    }
}
