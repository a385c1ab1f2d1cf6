// Sales data domain models
use chrono::NaiveDate;
use std::fmt;

/// Columns the aggregations read from a sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Value,
    Category,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Date => "date",
            Column::Value => "value",
            Column::Category => "category",
        };
        f.write_str(name)
    }
}

/// One row of sales data.
///
/// `date` is `None` when the source cell could not be parsed; such rows are
/// kept in the dataset but never aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: Option<NaiveDate>,
    pub value: f64,
    pub sales_rep: Option<String>,
}

impl SalesRecord {
    pub fn new(date: Option<NaiveDate>, value: f64, sales_rep: Option<String>) -> Self {
        Self {
            date,
            value,
            sales_rep,
        }
    }
}

/// Immutable in-memory sales table, built once at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, records: Vec<SalesRecord>) -> Self {
        Self { columns, records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Earliest and latest parseable dates, if any row has one.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateRange::new(min, max))
    }

    /// Records with a date inside `range`, in table order.
    pub fn filter<'a>(
        &'a self,
        range: &'a DateRange,
    ) -> impl Iterator<Item = (NaiveDate, &'a SalesRecord)> + 'a {
        self.records.iter().filter_map(move |record| {
            let date = record.date?;
            range.contains(date).then_some((date, record))
        })
    }
}

/// Inclusive date bounds. A range with `start > end` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn record(day: &str, value: f64, rep: &str) -> SalesRecord {
        SalesRecord::new(Some(date(day)), value, Some(rep.to_string()))
    }

    /// The three-row table used across aggregation and service tests.
    pub fn small_dataset() -> Dataset {
        Dataset::new(
            vec![Column::Date, Column::Value, Column::Category],
            vec![
                record("2024-01-01", 100.0, "A"),
                record("2024-01-01", 50.0, "B"),
                record("2024-01-02", 30.0, "A"),
            ],
        )
    }
}
