//! Plan validation
//!
//! All rules are checked and every violation is reported together; nothing is
//! simulated for a plan that fails any rule.

use super::PlanInput;
use crate::error::ValidationError;

/// Exclusive upper bound for the annual return, in percent
pub const MAX_RETURN_PERCENT: f64 = 50.0;

/// Exclusive upper bound for the annual fee, in percent
pub const MAX_FEE_PERCENT: f64 = 10.0;

/// Check a plan against every rule, returning all violations in rule order
pub fn validate(plan: &PlanInput) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // NaN fails the comparison and is reported as missing
    match plan.initial_salary() {
        Some(salary) if salary > 0.0 => {}
        _ => errors.push(ValidationError::InitialSalary),
    }

    if let Some(pair) = plan
        .income_changes
        .windows(2)
        .find(|pair| pair[1].month_start <= pair[0].month_start)
    {
        errors.push(ValidationError::IncomeOrder {
            previous: pair[0].month_start,
            month: pair[1].month_start,
        });
    }

    if let Some(pair) = plan
        .expense_periods
        .windows(2)
        .find(|pair| pair[1].month_start <= pair[0].month_start)
    {
        errors.push(ValidationError::ExpenseOrder {
            previous: pair[0].month_start,
            month: pair[1].month_start,
        });
    }

    if !plan.expense_periods.iter().any(|p| p.month_start == 0) {
        errors.push(ValidationError::MissingInitialExpenses);
    }

    if plan.expense_mode.is_none() {
        errors.push(ValidationError::ExpenseModeMissing);
    }

    if let Some(change) = plan.income_changes.iter().find(|c| c.salary < 0.0) {
        errors.push(ValidationError::NegativeSalary {
            month: change.month_start,
        });
    }

    let negative_item = plan.expense_periods.iter().find_map(|period| {
        period
            .items
            .iter()
            .find(|item| item.amount < 0.0)
            .map(|item| (period.month_start, item.name.clone()))
    });
    if let Some((month, name)) = negative_item {
        errors.push(ValidationError::NegativeExpense { month, name });
    }

    let rate = plan.investment.annual_return_percent;
    if !(rate > 0.0 && rate < MAX_RETURN_PERCENT) {
        errors.push(ValidationError::ReturnRange(rate));
    }

    let fee = plan.investment.annual_fee_percent;
    if !(0.0..MAX_FEE_PERCENT).contains(&fee) {
        errors.push(ValidationError::FeeRange(fee));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
