// Analysis domain models - aggregation results and chart payloads
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of supported aggregation views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    SalesOverTime,
    TopSalesReps,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 2] = [AnalysisKind::SalesOverTime, AnalysisKind::TopSalesReps];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::SalesOverTime => "sales_over_time",
            AnalysisKind::TopSalesReps => "top_sales_reps",
        }
    }

    /// Label shown in the report type selector.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::SalesOverTime => "Total Sales Over Time",
            AnalysisKind::TopSalesReps => "Sales by Sales Reps",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown analysis kind: {0}")]
pub struct UnknownAnalysisKind(pub String);

impl FromStr for AnalysisKind {
    type Err = UnknownAnalysisKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownAnalysisKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub category: String,
    pub value: f64,
}

impl RankingEntry {
    pub fn new(category: String, value: f64) -> Self {
        Self { category, value }
    }
}

/// Result of one aggregation view over a filtered dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    TimeSeries(Vec<TimeSeriesPoint>),
    Ranking(Vec<RankingEntry>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    pub fn from_aggregation(aggregation: Aggregation) -> Self {
        match aggregation {
            Aggregation::TimeSeries(series) => Self {
                title: "Total Sales Over Time".to_string(),
                kind: ChartKind::Line,
                x_label: "date".to_string(),
                y_label: "total_value_usd".to_string(),
                points: series
                    .into_iter()
                    .map(|p| ChartPoint {
                        label: p.date.format("%Y-%m-%d").to_string(),
                        value: p.value,
                    })
                    .collect(),
            },
            Aggregation::Ranking(ranking) => Self {
                title: "Sales by Sales Reps".to_string(),
                kind: ChartKind::Bar,
                x_label: "sales_rep_name".to_string(),
                y_label: "total_value_usd".to_string(),
                points: ranking
                    .into_iter()
                    .map(|e| ChartPoint {
                        label: e.category,
                        value: e.value,
                    })
                    .collect(),
            },
        }
    }
}
