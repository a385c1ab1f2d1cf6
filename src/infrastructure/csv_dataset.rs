// CSV dataset loader - builds the in-memory sales table at startup
use crate::domain::sales::{Column, Dataset, SalesRecord};
use crate::infrastructure::config::DataSettings;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
}

pub fn load_csv(path: &Path, settings: &DataSettings) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = read_csv(BufReader::new(file), settings)?;
    tracing::info!("Loaded {} sales records from {}", dataset.len(), path.display());
    Ok(dataset)
}

pub fn read_csv<R: Read>(reader: R, settings: &DataSettings) -> Result<Dataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let date_idx = position(&settings.date_column)
        .ok_or_else(|| DatasetError::MissingColumn(settings.date_column.clone()))?;
    let value_idx = position(&settings.value_column)
        .ok_or_else(|| DatasetError::MissingColumn(settings.value_column.clone()))?;
    let category_idx = position(&settings.category_column);

    let mut columns = vec![Column::Date, Column::Value];
    if category_idx.is_some() {
        columns.push(Column::Category);
    } else {
        tracing::warn!(
            "Column '{}' not found; sales rep ranking is unavailable",
            settings.category_column
        );
    }

    let mut records = Vec::new();
    let mut bad_values = 0usize;
    let mut bad_dates = 0usize;

    for result in rdr.records() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or_default().trim();

        // NaN and infinities count as malformed, like unparseable text
        let Some(value) = cell(value_idx)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
        else {
            bad_values += 1;
            continue;
        };

        let date = parse_date(cell(date_idx));
        if date.is_none() {
            bad_dates += 1;
        }

        let sales_rep = category_idx
            .map(cell)
            .filter(|rep| !rep.is_empty())
            .map(str::to_string);

        records.push(SalesRecord::new(date, value, sales_rep));
    }

    if bad_values > 0 {
        tracing::warn!("Skipped {} rows with a non-numeric or non-finite value", bad_values);
    }
    if bad_dates > 0 {
        tracing::warn!("{} rows have an unparseable date and will not be aggregated", bad_dates);
    }

    Ok(Dataset::new(columns, records))
}

/// Calendar date of a cell, ignoring any time of day.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}
