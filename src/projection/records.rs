//! Monthly plan output structures

use serde::{Deserialize, Deserializer, Serialize};

/// One month of the savings plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub month: u32,
    pub salary: f64,
    pub expenses: f64,
    /// Salary minus expenses, may be negative
    pub net_savings: f64,
    pub investment: f64,
    /// Running sum of net savings for months 0..=month, regardless of what was invested
    pub cumulative_savings: f64,
}

/// Ordered monthly records of one simulation run.
///
/// Lookups go through the record's `month` field rather than assuming the
/// vector index equals the month. Every way of building a plan from outside
/// the engine sorts the records by month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlyPlan {
    records: Vec<MonthlyRecord>,
}

impl MonthlyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; months must arrive in ascending order
    pub(crate) fn push(&mut self, record: MonthlyRecord) {
        debug_assert!(self.records.last().map_or(true, |last| last.month < record.month));
        self.records.push(record);
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&MonthlyRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&MonthlyRecord> {
        self.records.last()
    }

    /// Record for a given month, if simulated
    pub fn month(&self, month: u32) -> Option<&MonthlyRecord> {
        self.records
            .binary_search_by_key(&month, |r| r.month)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthlyRecord> {
        self.records.iter()
    }

    /// Total amount invested over the plan
    pub fn total_invested(&self) -> f64 {
        self.records.iter().map(|r| r.investment).sum()
    }
}

impl From<Vec<MonthlyRecord>> for MonthlyPlan {
    fn from(mut records: Vec<MonthlyRecord>) -> Self {
        records.sort_by_key(|r| r.month);
        Self { records }
    }
}

impl FromIterator<MonthlyRecord> for MonthlyPlan {
    fn from_iter<I: IntoIterator<Item = MonthlyRecord>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'de> Deserialize<'de> for MonthlyPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<MonthlyRecord>::deserialize(deserializer).map(Self::from)
    }
}

impl<'a> IntoIterator for &'a MonthlyPlan {
    type Item = &'a MonthlyRecord;
    type IntoIter = std::slice::Iter<'a, MonthlyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: u32, investment: f64) -> MonthlyRecord {
        MonthlyRecord {
            month,
            salary: 1000.0,
            expenses: 500.0,
            net_savings: 500.0,
            investment,
            cumulative_savings: 500.0 * (month + 1) as f64,
        }
    }

    #[test]
    fn test_collect_sorts_by_month() {
        let plan: MonthlyPlan = [record(2, 30.0), record(0, 10.0), record(1, 20.0)]
            .into_iter()
            .collect();
        let months: Vec<u32> = plan.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![0, 1, 2]);
        assert_eq!(plan.month(1).unwrap().investment, 20.0);
        assert_eq!(plan.month(2).unwrap().investment, 30.0);
    }

    #[test]
    fn test_deserialize_sorts_by_month() {
        let json = serde_json::to_string(&vec![record(5, 50.0), record(3, 30.0)]).unwrap();
        let plan: MonthlyPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan.first().unwrap().month, 3);
        assert_eq!(plan.month(5).unwrap().investment, 50.0);
        assert!(plan.month(4).is_none());
    }

    #[test]
    fn test_total_invested() {
        let plan: MonthlyPlan = (0..4).map(|m| record(m, 25.0)).collect();
        assert_eq!(plan.total_invested(), 100.0);
    }
}
