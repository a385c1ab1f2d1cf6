// Aggregator - pure views over the sales dataset
use crate::domain::analysis::{Aggregation, AnalysisKind, RankingEntry, TimeSeriesPoint};
use crate::domain::sales::{Column, DateRange, Dataset};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("dataset has no {0} column")]
    MissingColumn(Column),
}

fn require(dataset: &Dataset, columns: &[Column]) -> Result<(), AggregateError> {
    match columns.iter().find(|c| !dataset.has_column(**c)) {
        Some(missing) => Err(AggregateError::MissingColumn(*missing)),
        None => Ok(()),
    }
}

/// Summed value per distinct date inside `range`, ascending by date.
pub fn compute_time_series(
    dataset: &Dataset,
    range: &DateRange,
) -> Result<Vec<TimeSeriesPoint>, AggregateError> {
    require(dataset, &[Column::Date, Column::Value])?;
    if range.is_empty() {
        return Ok(Vec::new());
    }

    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, record) in dataset.filter(range) {
        *totals.entry(date).or_insert(0.0) += record.value;
    }

    Ok(totals
        .into_iter()
        .map(|(date, value)| TimeSeriesPoint::new(date, value))
        .collect())
}

/// Summed value per sales rep inside `range`, largest first.
///
/// Ties keep the order in which reps first appear in the table. `top_n` caps
/// the result; pass `None` for the full breakdown.
pub fn compute_ranking(
    dataset: &Dataset,
    range: &DateRange,
    top_n: Option<usize>,
) -> Result<Vec<RankingEntry>, AggregateError> {
    require(dataset, &[Column::Date, Column::Value, Column::Category])?;
    if range.is_empty() {
        return Ok(Vec::new());
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<RankingEntry> = Vec::new();
    for (_, record) in dataset.filter(range) {
        // Rows without a rep are dropped from the grouping
        let Some(rep) = record.sales_rep.as_deref() else {
            continue;
        };
        match index.get(rep) {
            Some(&i) => groups[i].value += record.value,
            None => {
                index.insert(rep, groups.len());
                groups.push(RankingEntry::new(rep.to_string(), record.value));
            }
        }
    }

    // sort_by is stable, so equal totals stay in first-seen order
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    if let Some(n) = top_n {
        groups.truncate(n);
    }
    Ok(groups)
}

impl AnalysisKind {
    /// Run the view this kind names. `top_n` only applies to rankings.
    pub fn aggregate(
        &self,
        dataset: &Dataset,
        range: &DateRange,
        top_n: Option<usize>,
    ) -> Result<Aggregation, AggregateError> {
        match self {
            AnalysisKind::SalesOverTime => {
                compute_time_series(dataset, range).map(Aggregation::TimeSeries)
            }
            AnalysisKind::TopSalesReps => {
                compute_ranking(dataset, range, top_n).map(Aggregation::Ranking)
            }
        }
    }
}
