//! Full simulation pipeline: validate, simulate, value, summarize, diagnose

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Scanner, Warning};
use crate::error::SimulationError;
use crate::plan::{validate, PlanInput};
use crate::projection::{
    summarize, value_portfolio, MonthlyPlan, PortfolioValuation, Projections, SimulationConfig,
    SimulationEngine,
};

/// Output of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub monthly_plan: MonthlyPlan,
    pub portfolio: PortfolioValuation,
    pub projections: Projections,
    pub warnings: Vec<Warning>,
}

/// Run the pipeline with the default configuration and the plan's horizon
pub fn run_simulation(plan: &PlanInput) -> Result<SimulationReport, SimulationError> {
    run_simulation_with(plan, &SimulationConfig::default())
}

/// Run the pipeline with a base configuration; a horizon set on the plan
/// overrides the configured one
pub fn run_simulation_with(
    plan: &PlanInput,
    config: &SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    if let Err(errors) = validate(plan) {
        warn!("plan rejected with {} validation error(s)", errors.len());
        return Err(SimulationError::Validation(errors));
    }

    let config = config.for_plan(plan);
    let result = run_stages(plan, &config);

    match &result {
        Ok(report) => info!(
            "simulated {} months, {} warning(s), final value {:.0}",
            report.monthly_plan.len(),
            report.warnings.len(),
            report.portfolio.last().map(|s| s.value).unwrap_or(0.0)
        ),
        Err(err) => warn!("{}", err),
    }
    result
}

fn run_stages(
    plan: &PlanInput,
    config: &SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    let engine = SimulationEngine::new(config.clone());
    let monthly_plan = engine.simulate(plan)?;

    let investment = &plan.investment;
    let portfolio = value_portfolio(
        &monthly_plan,
        investment.annual_return_percent,
        investment.annual_fee_percent,
    )?;
    debug!("valued portfolio over {} months", portfolio.len());

    let projections = summarize(&portfolio, &config.year_marks, config.fee_estimate_rate)?;

    let scanner = Scanner {
        emergency_multiple: config.allocation.emergency_multiple,
        ..Scanner::default()
    };
    let warnings = scanner.scan(&monthly_plan);
    debug!("diagnostics produced {} entries", warnings.len());

    Ok(SimulationReport {
        monthly_plan,
        portfolio,
        projections,
        warnings,
    })
}

/// Serializable result envelope: `ok` with the full report, or the failure list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub monthly_plan: MonthlyPlan,
    pub portfolio: PortfolioValuation,
    pub projections: Projections,
    pub warnings: Vec<Warning>,
}

impl From<Result<SimulationReport, SimulationError>> for SimulationResponse {
    fn from(result: Result<SimulationReport, SimulationError>) -> Self {
        match result {
            Ok(report) => Self {
                ok: true,
                errors: Vec::new(),
                monthly_plan: report.monthly_plan,
                portfolio: report.portfolio,
                projections: report.projections,
                warnings: report.warnings,
            },
            Err(err) => Self {
                ok: false,
                errors: err.messages(),
                monthly_plan: MonthlyPlan::default(),
                portfolio: PortfolioValuation::default(),
                projections: Projections::new(),
                warnings: Vec::new(),
            },
        }
    }
}
