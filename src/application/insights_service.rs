// Insights service - Use case for answering free-text questions about the data
use crate::application::aggregator::AggregateError;
use crate::application::insights_client::{InsightsClient, LlmError};
use crate::application::prompt::{SYSTEM_PROMPT, compose_prompt, compose_summary};
use crate::domain::analysis::AnalysisKind;
use crate::domain::insight::{StyledSpan, format_response, plain_text};
use crate::domain::sales::{DateRange, Dataset};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InsightRequest {
    pub query: Option<String>,
    pub n_clicks: u32,
    pub analysis: AnalysisKind,
    pub range: DateRange,
}

impl InsightRequest {
    /// The submitted question, once the button has been pressed with text in the box.
    fn submitted_query(&self) -> Option<&str> {
        if self.n_clicks == 0 {
            return None;
        }
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsightsPanel {
    /// Nothing submitted yet.
    Idle,
    Insights(Vec<StyledSpan>),
    Failed(LlmError),
}

#[derive(Clone)]
pub struct InsightsService {
    dataset: Arc<Dataset>,
    client: Arc<dyn InsightsClient>,
}

impl InsightsService {
    pub fn new(dataset: Arc<Dataset>, client: Arc<dyn InsightsClient>) -> Self {
        Self { dataset, client }
    }

    pub async fn generate(&self, request: &InsightRequest) -> Result<InsightsPanel, AggregateError> {
        let Some(query) = request.submitted_query() else {
            return Ok(InsightsPanel::Idle);
        };

        // The summary always sees the full breakdown
        let aggregation = request
            .analysis
            .aggregate(&self.dataset, &request.range, None)?;
        let summary = compose_summary(&aggregation);
        let prompt = compose_prompt(query, &summary);

        tracing::info!(
            "Requesting insights for {} over {}..={}",
            request.analysis,
            request.range.start,
            request.range.end
        );

        match self.client.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => {
                let spans = format_response(&reply);
                tracing::debug!("Insight reply: {}", plain_text(&spans));
                Ok(InsightsPanel::Insights(spans))
            }
            Err(e) => {
                tracing::warn!("Insights request failed: {}", e);
                Ok(InsightsPanel::Failed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::insights_client::mock::MockInsightsClient;
    use crate::domain::sales::fixtures::{date, small_dataset};
    use crate::domain::sales::Column;

    fn request(query: Option<&str>, n_clicks: u32, analysis: AnalysisKind) -> InsightRequest {
        InsightRequest {
            query: query.map(str::to_string),
            n_clicks,
            analysis,
            range: DateRange::new(date("2024-01-01"), date("2024-01-02")),
        }
    }

    fn service(client: Arc<MockInsightsClient>) -> InsightsService {
        InsightsService::new(Arc::new(small_dataset()), client)
    }

    #[tokio::test]
    async fn test_empty_query_issues_no_call() {
        let client = Arc::new(MockInsightsClient::replying("unused"));
        let service = service(client.clone());

        for req in [
            request(None, 1, AnalysisKind::SalesOverTime),
            request(Some(""), 1, AnalysisKind::SalesOverTime),
            request(Some("   "), 3, AnalysisKind::SalesOverTime),
            request(Some("why?"), 0, AnalysisKind::SalesOverTime),
        ] {
            assert_eq!(service.generate(&req).await, Ok(InsightsPanel::Idle));
        }
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_time_series_prompt_and_spans() {
        let client = Arc::new(MockInsightsClient::replying("Sales are **up**."));
        let service = service(client.clone());

        let panel = service
            .generate(&request(Some("How are sales?"), 1, AnalysisKind::SalesOverTime))
            .await
            .unwrap();

        assert_eq!(
            panel,
            InsightsPanel::Insights(vec![
                StyledSpan::Plain("Sales are ".to_string()),
                StyledSpan::Bold("up".to_string()),
                StyledSpan::Plain(".".to_string()),
            ])
        );

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].0, SYSTEM_PROMPT);
        assert_eq!(
            calls[0].1,
            "How are sales? Here is a summary of the data: Total sales over the selected period is 180.0 USD."
        );
    }

    #[tokio::test]
    async fn test_ranking_prompt_uses_full_breakdown() {
        let client = Arc::new(MockInsightsClient::replying("ok"));
        let service = service(client.clone());

        service
            .generate(&request(Some("Who leads?"), 2, AnalysisKind::TopSalesReps))
            .await
            .unwrap();

        let calls = client.calls.lock().unwrap();
        assert!(calls[0].1.ends_with("Top sales reps and their sales: {'A': 130.0, 'B': 50.0}."));
    }

    #[tokio::test]
    async fn test_client_failure_becomes_error_panel() {
        let client = Arc::new(MockInsightsClient::failing(LlmError::RateLimited(
            "slow down".to_string(),
        )));
        let service = service(client);

        let panel = service
            .generate(&request(Some("Trend?"), 1, AnalysisKind::SalesOverTime))
            .await
            .unwrap();
        assert_eq!(
            panel,
            InsightsPanel::Failed(LlmError::RateLimited("slow down".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_column_propagates() {
        let client = Arc::new(MockInsightsClient::replying("unused"));
        let dataset = Dataset::new(vec![Column::Date, Column::Value], vec![]);
        let service = InsightsService::new(Arc::new(dataset), client.clone());

        let result = service
            .generate(&request(Some("Who leads?"), 1, AnalysisKind::TopSalesReps))
            .await;
        assert_eq!(result, Err(AggregateError::MissingColumn(Column::Category)));
        assert_eq!(client.call_count(), 0);
    }
}
