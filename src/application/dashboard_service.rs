// Dashboard service - Use case for building charts and selector options
use crate::application::aggregator::AggregateError;
use crate::domain::analysis::{AnalysisKind, Chart};
use crate::domain::sales::{DateRange, Dataset};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

pub const DASHBOARD_TITLE: &str = "Interactive Sales Dashboard with AI Insights";

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOption {
    pub value: AnalysisKind,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOptions {
    pub title: &'static str,
    pub analysis_kinds: Vec<AnalysisOption>,
    pub default_analysis: AnalysisKind,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct DashboardService {
    dataset: Arc<Dataset>,
    top_n: usize,
}

impl DashboardService {
    pub fn new(dataset: Arc<Dataset>, top_n: usize) -> Self {
        Self { dataset, top_n }
    }

    pub fn options(&self) -> DashboardOptions {
        let bounds = self.dataset.date_bounds();
        DashboardOptions {
            title: DASHBOARD_TITLE,
            analysis_kinds: AnalysisKind::ALL
                .into_iter()
                .map(|kind| AnalysisOption {
                    value: kind,
                    label: kind.label(),
                })
                .collect(),
            default_analysis: AnalysisKind::SalesOverTime,
            min_date: bounds.map(|b| b.start),
            max_date: bounds.map(|b| b.end),
        }
    }

    /// Fill missing bounds from the dataset's own date span.
    pub fn resolve_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        let bounds = self
            .dataset
            .date_bounds()
            .unwrap_or(DateRange::new(NaiveDate::MIN, NaiveDate::MAX));
        DateRange::new(start.unwrap_or(bounds.start), end.unwrap_or(bounds.end))
    }

    pub fn chart(&self, kind: AnalysisKind, range: &DateRange) -> Result<Chart, AggregateError> {
        let aggregation = kind.aggregate(&self.dataset, range, Some(self.top_n))?;
        let chart = Chart::from_aggregation(aggregation);
        tracing::debug!(
            "Built {} chart for {}..={} with {} points",
            kind,
            range.start,
            range.end,
            chart.points.len()
        );
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ChartKind;
    use crate::domain::sales::fixtures::{date, record, small_dataset};
    use crate::domain::sales::Column;

    fn service() -> DashboardService {
        DashboardService::new(Arc::new(small_dataset()), 5)
    }

    #[test]
    fn test_options_use_dataset_bounds() {
        let options = service().options();
        assert_eq!(options.min_date, Some(date("2024-01-01")));
        assert_eq!(options.max_date, Some(date("2024-01-02")));
        assert_eq!(options.analysis_kinds.len(), 2);
        assert_eq!(options.default_analysis, AnalysisKind::SalesOverTime);
    }

    #[test]
    fn test_resolve_range_defaults() {
        let range = service().resolve_range(None, Some(date("2024-01-01")));
        assert_eq!(range, DateRange::new(date("2024-01-01"), date("2024-01-01")));
    }

    #[test]
    fn test_line_chart() {
        let service = service();
        let range = service.resolve_range(None, None);
        let chart = service.chart(AnalysisKind::SalesOverTime, &range).unwrap();
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.points[0].label, "2024-01-01");
        assert_eq!(chart.points[0].value, 150.0);
    }

    #[test]
    fn test_bar_chart_is_capped_for_display() {
        let dataset = Dataset::new(
            vec![Column::Date, Column::Value, Column::Category],
            (0..4)
                .map(|i| record("2024-01-01", i as f64, &format!("rep{i}")))
                .collect(),
        );
        let service = DashboardService::new(Arc::new(dataset), 2);
        let range = service.resolve_range(None, None);
        let chart = service.chart(AnalysisKind::TopSalesReps, &range).unwrap();
        let labels: Vec<_> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["rep3", "rep2"]);
    }
}
