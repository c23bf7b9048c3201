//! Piecewise timeline resolution for salary and expenses
//!
//! A change record applies from its `month_start` onward until a later record
//! supersedes it. Months before the first record resolve to 0.

use crate::plan::{ExpensePeriod, IncomeChange};

/// Salary in effect at `month`: the record with the greatest `month_start <= month`
pub fn resolve_salary(month: u32, income_changes: &[IncomeChange]) -> f64 {
    income_changes
        .iter()
        .filter(|change| change.month_start <= month)
        .max_by_key(|change| change.month_start)
        .map(|change| change.salary)
        .unwrap_or(0.0)
}

/// Total expenses in effect at `month`, summed over the applicable period's items
pub fn resolve_expenses(month: u32, expense_periods: &[ExpensePeriod]) -> f64 {
    expense_periods
        .iter()
        .filter(|period| period.month_start <= month)
        .max_by_key(|period| period.month_start)
        .map(ExpensePeriod::total)
        .unwrap_or(0.0)
}

/// Precomputed step functions answering the same queries as
/// [`resolve_salary`] and [`resolve_expenses`] by binary search.
#[derive(Debug, Clone)]
pub struct Timeline {
    salary_steps: Vec<(u32, f64)>,
    expense_steps: Vec<(u32, f64)>,
}

impl Timeline {
    pub fn new(income_changes: &[IncomeChange], expense_periods: &[ExpensePeriod]) -> Self {
        Self {
            salary_steps: build_steps(income_changes.iter().map(|c| (c.month_start, c.salary))),
            expense_steps: build_steps(expense_periods.iter().map(|p| (p.month_start, p.total()))),
        }
    }

    pub fn salary_at(&self, month: u32) -> f64 {
        lookup(&self.salary_steps, month)
    }

    pub fn expenses_at(&self, month: u32) -> f64 {
        lookup(&self.expense_steps, month)
    }
}

/// Sort by start month and keep the last record for each month, matching the
/// tie-break of a linear scan
fn build_steps(records: impl Iterator<Item = (u32, f64)>) -> Vec<(u32, f64)> {
    let mut steps: Vec<(u32, f64)> = records.collect();
    steps.sort_by_key(|&(start, _)| start);

    let mut deduped: Vec<(u32, f64)> = Vec::with_capacity(steps.len());
    for step in steps {
        match deduped.last_mut() {
            Some(last) if last.0 == step.0 => *last = step,
            _ => deduped.push(step),
        }
    }
    deduped
}

fn lookup(steps: &[(u32, f64)], month: u32) -> f64 {
    let applicable = steps.partition_point(|&(start, _)| start <= month);
    if applicable == 0 {
        0.0
    } else {
        steps[applicable - 1].1
    }
}
