//! Plan input model, loading and validation

mod data;
pub mod loader;
pub mod validation;

pub use data::{
    ExpenseItem, ExpenseMode, ExpensePeriod, IncomeChange, InvestmentConfig, PlanInput,
    DEFAULT_HORIZON_MONTHS,
};
pub use loader::{load_expense_items, load_plan, load_plan_from_reader};
pub use validation::validate;
