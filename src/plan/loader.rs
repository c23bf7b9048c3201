//! Load plans from JSON and expense sheets from CSV

use super::{ExpenseItem, PlanInput};
use crate::error::PlanLoadError;
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row of an expense sheet (`name,amount`)
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    /// Blank cells are read as 0
    amount: Option<f64>,
}

impl CsvRow {
    fn to_item(self) -> ExpenseItem {
        ExpenseItem::new(self.name.trim(), self.amount.unwrap_or(0.0))
    }
}

/// Load a plan description from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanInput, PlanLoadError> {
    let file = File::open(path)?;
    load_plan_from_reader(BufReader::new(file))
}

/// Load a plan description from any reader (e.g., string buffer, request body)
pub fn load_plan_from_reader<R: Read>(reader: R) -> Result<PlanInput, PlanLoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load the items of one expense period from a CSV file
pub fn load_expense_items<P: AsRef<Path>>(path: P) -> Result<Vec<ExpenseItem>, PlanLoadError> {
    let file = File::open(path)?;
    load_expense_items_from_reader(file)
}

/// Load expense items from any reader
pub fn load_expense_items_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<ExpenseItem>, PlanLoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut items = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        items.push(row.to_item());
    }

    Ok(items)
}
