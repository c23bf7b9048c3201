//! Anomaly scan over a simulated monthly plan

use serde::{Deserialize, Serialize};

use crate::projection::MonthlyPlan;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    Error,
    Warning,
    Info,
}

/// A non-fatal finding attached to a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
    /// Month the finding refers to; `None` for plan-wide findings
    pub month: Option<u32>,
}

impl Warning {
    fn at(kind: WarningKind, month: u32, message: String) -> Self {
        Self {
            kind,
            message,
            month: Some(month),
        }
    }
}

/// Thresholds used by the scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scanner {
    /// Expense share of income above which a month is flagged
    pub expense_ratio_threshold: f64,
    /// Months of first-month expenses that make up the emergency fund milestone
    pub emergency_multiple: f64,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            expense_ratio_threshold: 0.75,
            emergency_multiple: 3.0,
        }
    }
}

impl Scanner {
    /// Scan every month in order, then report the emergency fund milestone
    pub fn scan(&self, plan: &MonthlyPlan) -> Vec<Warning> {
        let mut warnings = Vec::new();

        for record in plan {
            let month = record.month;

            if record.expenses > record.salary {
                warnings.push(Warning::at(
                    WarningKind::Error,
                    month,
                    format!(
                        "expenses exceed income in month {} ({} vs {})",
                        month,
                        format_money(record.expenses),
                        format_money(record.salary)
                    ),
                ));
            } else if record.salary > 0.0
                && record.expenses > record.salary * self.expense_ratio_threshold
            {
                let percent = (record.expenses / record.salary * 100.0).round();
                warnings.push(Warning::at(
                    WarningKind::Warning,
                    month,
                    format!("expenses are {}% of income in month {}", percent, month),
                ));
            }

            if record.net_savings < 0.0 {
                warnings.push(Warning::at(
                    WarningKind::Error,
                    month,
                    format!(
                        "negative savings in month {} (-{})",
                        month,
                        format_money(record.net_savings.abs())
                    ),
                ));
            }
        }

        // Target is fixed at the first month's expense level
        if let Some(first) = plan.first() {
            let target = first.expenses * self.emergency_multiple;
            if let Some(reached) = plan.iter().find(|r| r.cumulative_savings >= target) {
                warnings.push(Warning {
                    kind: WarningKind::Info,
                    message: format!(
                        "emergency fund of {} reached in month {}",
                        format_money(target),
                        reached.month
                    ),
                    month: None,
                });
            }
        }

        warnings
    }
}

/// [`Scanner::scan`] with the default thresholds
pub fn scan(plan: &MonthlyPlan) -> Vec<Warning> {
    Scanner::default().scan(plan)
}

/// Format an amount as `1,234.56 €`
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02} €", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::MonthlyRecord;

    fn plan_from(months: &[(f64, f64)]) -> MonthlyPlan {
        let mut cumulative = 0.0;
        months
            .iter()
            .enumerate()
            .map(|(month, &(salary, expenses))| {
                let net_savings = salary - expenses;
                cumulative += net_savings;
                MonthlyRecord {
                    month: month as u32,
                    salary,
                    expenses,
                    net_savings,
                    investment: 0.0,
                    cumulative_savings: cumulative,
                }
            })
            .collect()
    }

    fn of_kind(warnings: &[Warning], kind: WarningKind) -> Vec<&Warning> {
        warnings.iter().filter(|w| w.kind == kind).collect()
    }

    #[test]
    fn test_expenses_exceed_income_is_error_not_ratio_warning() {
        let plan = plan_from(&[(2000.0, 500.0), (2000.0, 500.0), (2000.0, 500.0), (900.0, 1000.0)]);
        let warnings = scan(&plan);

        let month3: Vec<&Warning> = warnings.iter().filter(|w| w.month == Some(3)).collect();
        assert_eq!(month3.len(), 2);
        assert!(month3.iter().all(|w| w.kind == WarningKind::Error));
        assert!(month3[0].message.starts_with("expenses exceed income in month 3"));
        assert!(month3[1].message.starts_with("negative savings in month 3"));
        assert!(of_kind(&warnings, WarningKind::Warning).is_empty());
    }

    #[test]
    fn test_high_expense_ratio_warning() {
        let plan = plan_from(&[(1000.0, 800.0)]);
        let warnings = scan(&plan);
        assert_eq!(
            warnings[0],
            Warning {
                kind: WarningKind::Warning,
                message: "expenses are 80% of income in month 0".to_string(),
                month: Some(0),
            }
        );
    }

    #[test]
    fn test_ratio_at_threshold_not_flagged() {
        let plan = plan_from(&[(1000.0, 750.0)]);
        assert!(of_kind(&scan(&plan), WarningKind::Warning).is_empty());
    }

    #[test]
    fn test_zero_salary_does_not_divide() {
        let plan = plan_from(&[(0.0, 0.0), (0.0, 400.0)]);
        let warnings = scan(&plan);
        assert!(of_kind(&warnings, WarningKind::Warning).is_empty());
        assert!(warnings.iter().all(|w| !w.message.contains("NaN") && !w.message.contains("inf")));
        assert_eq!(of_kind(&warnings, WarningKind::Error).len(), 2);
    }

    #[test]
    fn test_emergency_fund_milestone_once() {
        // first month expenses 1000, target 3000 reached after month 2
        let plan = plan_from(&[(2000.0, 1000.0); 12]);
        let infos: Vec<Warning> = scan(&plan)
            .into_iter()
            .filter(|w| w.kind == WarningKind::Info)
            .collect();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].month, None);
        assert_eq!(infos[0].message, "emergency fund of 3,000.00 € reached in month 2");
    }

    #[test]
    fn test_milestone_uses_first_month_expenses() {
        // expenses drop later, but the target stays at 3 * 1500
        let plan = plan_from(&[
            (1600.0, 1500.0),
            (1600.0, 100.0),
            (1600.0, 100.0),
            (1600.0, 100.0),
        ]);
        let infos = of_kind(&scan(&plan), WarningKind::Info).len();
        assert_eq!(infos, 1);

        let never = plan_from(&[(1600.0, 1500.0); 24]);
        assert!(of_kind(&scan(&never), WarningKind::Info).is_empty());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00 €");
        assert_eq!(format_money(999.999), "1,000.00 €");
        assert_eq!(format_money(1234567.5), "1,234,567.50 €");
        assert_eq!(format_money(-42.1), "-42.10 €");
    }
}
