//! Savings Plan - month-by-month household savings and investment projection
//!
//! This library provides:
//! - Piecewise salary and expense timelines
//! - An investment allocation policy gated on an emergency fund
//! - A monthly simulation, compounding portfolio valuation and year-mark summaries
//! - Diagnostics for insolvency, high expense ratios and the emergency fund milestone
//! - Batch and return-sweep runs, CSV export

pub mod allocation;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod plan;
pub mod projection;
pub mod scenario;
pub mod simulation;
pub mod timeline;

// Re-export commonly used types
pub use allocation::{compute_investment, AllocationPolicy};
pub use diagnostics::{Warning, WarningKind};
pub use error::{ComputationError, PlanLoadError, SimulationError, ValidationError};
pub use plan::{ExpenseItem, ExpenseMode, ExpensePeriod, IncomeChange, InvestmentConfig, PlanInput};
pub use projection::{
    MonthlyPlan, MonthlyRecord, PortfolioSnapshot, ProjectionSummary, SimulationEngine,
};
pub use scenario::ScenarioRunner;
pub use simulation::{run_simulation, SimulationReport, SimulationResponse};
pub use timeline::{resolve_expenses, resolve_salary};
