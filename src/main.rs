//! Savings Plan CLI
//!
//! Runs a plan description through the simulation and prints the result

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use savings_plan::export::write_report_csv_to_path;
use savings_plan::plan::load_plan;
use savings_plan::{run_simulation, ExpenseItem, ExpenseMode, PlanInput, SimulationResponse};

#[derive(Debug, Parser)]
#[command(name = "savings_plan", about = "Project a household savings and investment plan")]
struct Cli {
    /// Plan description (JSON); a sample plan is used when omitted
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Override the horizon in months
    #[arg(long)]
    horizon: Option<u32>,

    /// Write the monthly plan to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of the summary table
    #[arg(long)]
    json: bool,
}

fn sample_plan() -> Result<PlanInput> {
    let plan = PlanInput::default()
        .with_initial_salary(2100.0)
        .with_income_change(24, 2400.0, "Promotion")?
        .with_income_change(84, 2900.0, "New role")?
        .with_expense_mode(ExpenseMode::Detailed)
        .with_expense_period(
            0,
            vec![
                ExpenseItem::new("Rent", 800.0),
                ExpenseItem::new("Food", 300.0),
                ExpenseItem::new("Utilities", 110.0),
                ExpenseItem::new("Other", 190.0),
            ],
        )
        .with_expense_period(
            60,
            vec![
                ExpenseItem::new("Rent", 950.0),
                ExpenseItem::new("Food", 380.0),
                ExpenseItem::new("Utilities", 130.0),
                ExpenseItem::new("Other", 240.0),
            ],
        );
    Ok(plan)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut plan = match &cli.plan {
        Some(path) => load_plan(path)
            .with_context(|| format!("loading plan from {}", path.display()))?,
        None => sample_plan()?,
    };
    if let Some(horizon) = cli.horizon {
        plan = plan.with_horizon(horizon);
    }

    let result = run_simulation(&plan);

    if cli.json {
        let response = SimulationResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            for message in err.messages() {
                eprintln!("  - {}", message);
            }
            bail!("simulation failed");
        }
    };

    println!("Fund: {}", plan.investment.fund_name);
    if let Some(isin) = &plan.investment.isin {
        println!("  ISIN: {}", isin);
    }
    println!(
        "  Return: {:.2}%  Fee: {:.2}%",
        plan.investment.annual_return_percent, plan.investment.annual_fee_percent
    );
    println!();

    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Years", "Month", "Contributed", "Gains", "Value", "Est. fees"
    );
    println!("{}", "-".repeat(70));
    for summary in report.projections.values() {
        println!(
            "{:>5} {:>12} {:>12.0} {:>12.0} {:>12.0} {:>12.0}",
            summary.years,
            summary.months,
            summary.contributed,
            summary.gains,
            summary.value,
            summary.estimated_fees,
        );
    }

    if !report.warnings.is_empty() {
        println!("\nDiagnostics ({}):", report.warnings.len());
        for warning in report.warnings.iter().take(20) {
            println!("  [{:?}] {}", warning.kind, warning.message);
        }
        if report.warnings.len() > 20 {
            println!("  ... ({} more)", report.warnings.len() - 20);
        }
    }

    if let Some(path) = &cli.csv {
        write_report_csv_to_path(path, &report, plan.start_date)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nMonthly plan written to: {}", path.display());
    }

    Ok(())
}
