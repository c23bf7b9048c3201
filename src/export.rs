//! CSV export of a simulation report

use std::io::Write;
use std::path::Path;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::simulation::SimulationReport;

/// One exported row: the monthly plan joined with its portfolio snapshot
#[derive(Debug, Serialize)]
struct ExportRow {
    month: u32,
    period: Option<String>,
    salary: f64,
    expenses: f64,
    net_savings: f64,
    investment: f64,
    cumulative_savings: f64,
    portfolio_value: f64,
    contributed: f64,
    gains: f64,
}

/// Calendar label (`YYYY-MM`) of a simulated month
pub fn month_label(start: NaiveDate, month: u32) -> Option<String> {
    start
        .checked_add_months(Months::new(month))
        .map(|date| date.format("%Y-%m").to_string())
}

/// Write the report as CSV, one row per month
pub fn write_report_csv<W: Write>(
    writer: W,
    report: &SimulationReport,
    start_date: Option<NaiveDate>,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in &report.monthly_plan {
        let snapshot = report.portfolio.month(record.month);
        csv_writer.serialize(ExportRow {
            month: record.month,
            period: start_date.and_then(|start| month_label(start, record.month)),
            salary: record.salary,
            expenses: record.expenses,
            net_savings: record.net_savings,
            investment: record.investment,
            cumulative_savings: record.cumulative_savings,
            portfolio_value: snapshot.map_or(0.0, |s| s.value),
            contributed: snapshot.map_or(0.0, |s| s.contributed),
            gains: snapshot.map_or(0.0, |s| s.gains),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the report to a CSV file
pub fn write_report_csv_to_path<P: AsRef<Path>>(
    path: P,
    report: &SimulationReport,
    start_date: Option<NaiveDate>,
) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_report_csv(file, report, start_date)
}
