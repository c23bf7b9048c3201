//! Run one plan under a range of annual returns
//!
//! Outputs the year-mark values per return rate as CSV

use anyhow::{bail, Context, Result};
use clap::Parser;
use savings_plan::plan::load_plan;
use savings_plan::scenario::SweepPoint;
use savings_plan::ScenarioRunner;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Upper bound on the number of return rates in one sweep
const MAX_SWEEP_POINTS: usize = 10_000;

#[derive(Debug, Parser)]
#[command(name = "return_sweep", about = "Sensitivity of a plan to the annual return")]
struct Cli {
    /// Plan description (JSON)
    plan: PathBuf,

    /// Lowest annual return in percent
    #[arg(long, default_value_t = 2.0)]
    from: f64,

    /// Highest annual return in percent
    #[arg(long, default_value_t = 12.0)]
    to: f64,

    /// Step between returns in percent
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    /// Output file
    #[arg(long, default_value = "return_sweep.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SweepRow {
    annual_return: f64,
    value_5y: Option<f64>,
    value_10y: Option<f64>,
    value_20y: Option<f64>,
    contributed_20y: Option<f64>,
    warnings: Option<usize>,
    error: Option<String>,
}

impl From<&SweepPoint> for SweepRow {
    fn from(point: &SweepPoint) -> Self {
        match &point.result {
            Ok(report) => {
                let mark = |years: u32| report.projections.get(&years);
                Self {
                    annual_return: point.annual_return_percent,
                    value_5y: mark(5).map(|s| s.value),
                    value_10y: mark(10).map(|s| s.value),
                    value_20y: mark(20).map(|s| s.value),
                    contributed_20y: mark(20).map(|s| s.contributed),
                    warnings: Some(report.warnings.len()),
                    error: None,
                }
            }
            Err(err) => Self {
                annual_return: point.annual_return_percent,
                value_5y: None,
                value_10y: None,
                value_20y: None,
                contributed_20y: None,
                warnings: None,
                error: Some(err.messages().join("; ")),
            },
        }
    }
}

/// Annual returns from `from` to `to` inclusive, `step` apart
fn return_grid(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    if !from.is_finite() || !to.is_finite() {
        bail!("return bounds must be finite numbers");
    }
    if !step.is_finite() || step <= 0.0 {
        bail!("step must be a positive number (got {})", step);
    }
    if to < from {
        bail!("--to ({}) is below --from ({})", to, from);
    }

    let steps = ((to - from) / step).floor();
    if steps >= MAX_SWEEP_POINTS as f64 {
        bail!("sweep of more than {} returns requested", MAX_SWEEP_POINTS);
    }
    Ok((0..=steps as usize).map(|i| from + step * i as f64).collect())
}

fn write_sweep_csv<W: Write>(writer: W, points: &[SweepPoint]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(SweepRow::from(point))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let plan = load_plan(&cli.plan)
        .with_context(|| format!("loading plan from {}", cli.plan.display()))?;
    let rates = return_grid(cli.from, cli.to, cli.step)?;

    println!("Running {} scenarios...", rates.len());
    let runner = ScenarioRunner::new();
    let points = runner.run_return_sweep(&plan, &rates);
    println!("Scenarios complete in {:?}", start.elapsed());

    let file = std::fs::File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_sweep_csv(file, &points)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!("Output written to {}", cli.output.display());
    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use savings_plan::{ExpenseItem, ExpenseMode, PlanInput};

    #[test]
    fn test_return_grid_is_inclusive() {
        let rates = return_grid(2.0, 4.0, 0.5).unwrap();
        assert_eq!(rates, vec![2.0, 2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn test_return_grid_rejects_bad_steps() {
        assert!(return_grid(2.0, 12.0, 0.0).is_err());
        assert!(return_grid(2.0, 12.0, -0.5).is_err());
        assert!(return_grid(2.0, 12.0, f64::NAN).is_err());
        assert!(return_grid(2.0, f64::INFINITY, 0.5).is_err());
        assert!(return_grid(12.0, 2.0, 0.5).is_err());
        assert!(return_grid(0.0, 1.0, 1e-9).is_err());
    }

    #[test]
    fn test_error_rows_stay_well_formed() {
        let plan = PlanInput::default()
            .with_initial_salary(2000.0)
            .with_expense_mode(ExpenseMode::Detailed)
            .with_expense_period(0, vec![ExpenseItem::new("Loan \"B\", car", -5.0)]);
        let points = ScenarioRunner::new().run_return_sweep(&plan, &[5.0, 6.0]);
        assert!(points.iter().all(|p| p.result.is_err()));

        let mut buffer = Vec::new();
        write_sweep_csv(&mut buffer, &points).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "AnnualReturn",
                "Value5y",
                "Value10y",
                "Value20y",
                "Contributed20y",
                "Warnings",
                "Error"
            ]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.len(), headers.len());
            assert!(row[6].contains("Loan \"B\", car"));
        }
    }

    #[test]
    fn test_success_rows_carry_marks() {
        let plan = PlanInput::default()
            .with_initial_salary(2000.0)
            .with_expense_mode(ExpenseMode::Simple)
            .with_expense_period(0, vec![ExpenseItem::new("Rent", 900.0)]);
        let points = ScenarioRunner::new().run_return_sweep(&plan, &[7.0]);
        let row = SweepRow::from(&points[0]);
        assert_eq!(row.annual_return, 7.0);
        assert!(row.value_20y.unwrap() > row.value_10y.unwrap());
        assert!(row.error.is_none());
    }
}
