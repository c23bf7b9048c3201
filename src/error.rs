//! Error types for plan loading, validation and simulation

use thiserror::Error;

/// A violated plan rule. The `Display` text is the message reported to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("initial salary must be greater than 0")]
    InitialSalary,

    #[error("salary change months must be in ascending order (month {month} follows month {previous})")]
    IncomeOrder { previous: u32, month: u32 },

    #[error("expense period months must be in ascending order (month {month} follows month {previous})")]
    ExpenseOrder { previous: u32, month: u32 },

    #[error("expense periods must start at month 0")]
    MissingInitialExpenses,

    #[error("an expense mode must be selected")]
    ExpenseModeMissing,

    #[error("salary in month {month} must not be negative")]
    NegativeSalary { month: u32 },

    #[error("expense '{name}' in month {month} must not be negative")]
    NegativeExpense { month: u32, name: String },

    #[error("annual return must be between 0% and 50% (got {0}%)")]
    ReturnRange(f64),

    #[error("annual fee must be between 0% and 10% (got {0}%)")]
    FeeRange(f64),
}

/// A fault raised while running the simulation stages on a validated plan
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("{field} is not a finite number in month {month}")]
    NonFinite { field: &'static str, month: u32 },

    #[error("horizon of {0} months is beyond the supported maximum")]
    HorizonTooLong(u32),

    #[error("month {0} is missing from the monthly plan")]
    MissingMonth(u32),
}

/// Failure of a full simulation run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("plan failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("computation failed: {0}")]
    Computation(#[from] ComputationError),
}

impl SimulationError {
    /// Human-readable failure list, one entry per violated rule or a single
    /// computation failure entry
    pub fn messages(&self) -> Vec<String> {
        match self {
            SimulationError::Validation(errors) => errors.iter().map(|e| e.to_string()).collect(),
            SimulationError::Computation(_) => vec![self.to_string()],
        }
    }
}

/// Rejected edit of a plan value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanEditError {
    #[error("a change already exists at month {0}")]
    DuplicateMonth(u32),

    #[error("the month 0 entry cannot be removed")]
    InitialEntry,

    #[error("no entry starts at month {0}")]
    UnknownMonth(u32),
}

/// Failure to read a plan description from disk or a reader
#[derive(Debug, Error)]
pub enum PlanLoadError {
    #[error("failed to read plan: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid expense sheet: {0}")]
    Csv(#[from] csv::Error),
}
