//! Plan description: income timeline, expense periods and investment settings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PlanEditError;

/// Default simulation horizon (20 years)
pub const DEFAULT_HORIZON_MONTHS: u32 = 240;

/// A salary override effective from `month_start` until superseded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeChange {
    pub month_start: u32,
    pub salary: f64,
    #[serde(default)]
    pub description: String,
}

impl IncomeChange {
    pub fn new(month_start: u32, salary: f64, description: impl Into<String>) -> Self {
        Self {
            month_start,
            salary,
            description: description.into(),
        }
    }
}

/// A single named monthly expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub name: String,
    /// Missing amounts deserialize as 0
    #[serde(default)]
    pub amount: f64,
}

impl ExpenseItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Expense items effective from `month_start` until superseded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePeriod {
    pub month_start: u32,
    #[serde(default)]
    pub items: Vec<ExpenseItem>,
}

impl ExpensePeriod {
    pub fn new(month_start: u32, items: Vec<ExpenseItem>) -> Self {
        Self { month_start, items }
    }

    /// Sum of item amounts; non-finite amounts count as 0
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| if item.amount.is_finite() { item.amount } else { 0.0 })
            .sum()
    }
}

/// How expenses were entered by the data-entry front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseMode {
    /// A single total per period
    Simple,
    /// Itemized expenses per period
    Detailed,
}

/// Fund the monthly investment goes into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentConfig {
    pub fund_name: String,
    #[serde(default)]
    pub isin: Option<String>,
    /// Annual fee in percent, e.g. 0.42 for 0.42%
    pub annual_fee_percent: f64,
    /// Expected gross annual return in percent, e.g. 8.5 for 8.5%
    pub annual_return_percent: f64,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            fund_name: "Vanguard FTSE Global All Cap".to_string(),
            isin: Some("IE00B03HD191".to_string()),
            annual_fee_percent: 0.42,
            annual_return_percent: 8.5,
        }
    }
}

/// Complete plan handed over by the data-entry collaborator.
///
/// Plans are values: every edit returns a new plan and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub income_changes: Vec<IncomeChange>,
    pub expense_periods: Vec<ExpensePeriod>,
    #[serde(default)]
    pub expense_mode: Option<ExpenseMode>,
    #[serde(default)]
    pub investment: InvestmentConfig,
    /// Overrides the 240 month default horizon
    #[serde(default)]
    pub horizon_months: Option<u32>,
    /// Calendar month of month 0, used only to label exported rows
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Default for PlanInput {
    fn default() -> Self {
        Self {
            income_changes: vec![IncomeChange::new(0, 0.0, "Initial salary")],
            expense_periods: vec![ExpensePeriod::new(
                0,
                ["Rent", "Food", "Utilities", "Other"]
                    .into_iter()
                    .map(|name| ExpenseItem::new(name, 0.0))
                    .collect(),
            )],
            expense_mode: None,
            investment: InvestmentConfig::default(),
            horizon_months: None,
            start_date: None,
        }
    }
}

impl PlanInput {
    /// Effective horizon in months
    pub fn horizon(&self) -> u32 {
        self.horizon_months.unwrap_or(DEFAULT_HORIZON_MONTHS)
    }

    /// Salary of the month 0 entry, if one exists
    pub fn initial_salary(&self) -> Option<f64> {
        self.income_changes
            .iter()
            .find(|change| change.month_start == 0)
            .map(|change| change.salary)
    }

    /// Income changes after the initial salary
    pub fn salary_changes(&self) -> &[IncomeChange] {
        match self.income_changes.first() {
            Some(first) if first.month_start == 0 => &self.income_changes[1..],
            _ => &self.income_changes,
        }
    }

    /// Total of the expense period starting exactly at `month_start`, 0 if none
    pub fn expense_total(&self, month_start: u32) -> f64 {
        self.expense_periods
            .iter()
            .find(|period| period.month_start == month_start)
            .map(ExpensePeriod::total)
            .unwrap_or(0.0)
    }

    pub fn with_initial_salary(&self, salary: f64) -> Self {
        let mut next = self.clone();
        match next.income_changes.iter_mut().find(|c| c.month_start == 0) {
            Some(initial) => initial.salary = salary,
            None => next
                .income_changes
                .insert(0, IncomeChange::new(0, salary, "Initial salary")),
        }
        next
    }

    /// Add a salary change, keeping the list sorted by month
    pub fn with_income_change(
        &self,
        month_start: u32,
        salary: f64,
        description: &str,
    ) -> Result<Self, PlanEditError> {
        if self.income_changes.iter().any(|c| c.month_start == month_start) {
            return Err(PlanEditError::DuplicateMonth(month_start));
        }

        let description = if description.is_empty() {
            format!("Change in month {}", month_start)
        } else {
            description.to_string()
        };

        let mut next = self.clone();
        next.income_changes
            .push(IncomeChange::new(month_start, salary, description));
        next.income_changes.sort_by_key(|c| c.month_start);
        Ok(next)
    }

    pub fn without_income_change(&self, month_start: u32) -> Result<Self, PlanEditError> {
        if month_start == 0 {
            return Err(PlanEditError::InitialEntry);
        }
        let index = self
            .income_changes
            .iter()
            .position(|c| c.month_start == month_start)
            .ok_or(PlanEditError::UnknownMonth(month_start))?;

        let mut next = self.clone();
        next.income_changes.remove(index);
        Ok(next)
    }

    pub fn with_expense_mode(&self, mode: ExpenseMode) -> Self {
        Self {
            expense_mode: Some(mode),
            ..self.clone()
        }
    }

    /// Replace the items of the period at `month_start`, or insert a new period in order
    pub fn with_expense_period(&self, month_start: u32, items: Vec<ExpenseItem>) -> Self {
        let mut next = self.clone();
        match next
            .expense_periods
            .iter_mut()
            .find(|p| p.month_start == month_start)
        {
            Some(period) => period.items = items,
            None => {
                next.expense_periods
                    .push(ExpensePeriod::new(month_start, items));
                next.expense_periods.sort_by_key(|p| p.month_start);
            }
        }
        next
    }

    pub fn without_expense_period(&self, month_start: u32) -> Result<Self, PlanEditError> {
        if month_start == 0 {
            return Err(PlanEditError::InitialEntry);
        }
        let index = self
            .expense_periods
            .iter()
            .position(|p| p.month_start == month_start)
            .ok_or(PlanEditError::UnknownMonth(month_start))?;

        let mut next = self.clone();
        next.expense_periods.remove(index);
        Ok(next)
    }

    pub fn with_investment(&self, investment: InvestmentConfig) -> Self {
        Self {
            investment,
            ..self.clone()
        }
    }

    pub fn with_horizon(&self, horizon_months: u32) -> Self {
        Self {
            horizon_months: Some(horizon_months),
            ..self.clone()
        }
    }
}
