//! Simulation engine, portfolio valuation and year-mark summaries

mod engine;
mod portfolio;
mod records;
mod state;
mod summary;

pub use engine::{MonthlyRecords, SimulationConfig, SimulationEngine, MAX_HORIZON_MONTHS};
pub use portfolio::{monthly_rate, value_portfolio, PortfolioSnapshot, PortfolioValuation};
pub use records::{MonthlyPlan, MonthlyRecord};
pub use state::SimulationState;
pub use summary::{
    summarize, ProjectionSummary, Projections, YearMark, DEFAULT_YEAR_MARKS, FEE_ESTIMATE_RATE,
};
