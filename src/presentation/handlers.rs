// HTTP request handlers
use crate::application::aggregator::AggregateError;
use crate::application::insights_service::{InsightRequest, InsightsPanel};
use crate::domain::analysis::AnalysisKind;
use crate::domain::insight::StyledSpan;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Deserialize)]
pub struct ChartQuery {
    pub analysis: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct InsightsBody {
    pub query: Option<String>,
    pub analysis: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub n_clicks: u32,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Insights panel as the page renders it.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum PanelView {
    Idle,
    Ok {
        title: &'static str,
        spans: Vec<StyledSpan>,
    },
    Error {
        title: &'static str,
        kind: &'static str,
        message: String,
    },
}

impl From<InsightsPanel> for PanelView {
    fn from(panel: InsightsPanel) -> Self {
        match panel {
            InsightsPanel::Idle => PanelView::Idle,
            InsightsPanel::Insights(spans) => PanelView::Ok {
                title: "AI Insights",
                spans,
            },
            InsightsPanel::Failed(e) => PanelView::Error {
                title: "Error",
                kind: e.kind(),
                message: format!("An error occurred: {}", e),
            },
        }
    }
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

async fn error_response(status: StatusCode, message: String, compress: bool) -> Response {
    respond(status, &ErrorBody { error: message }, compress).await
}

fn parse_analysis(raw: Option<&str>) -> Result<AnalysisKind, String> {
    match raw {
        None => Ok(AnalysisKind::SalesOverTime),
        Some(s) => s.parse::<AnalysisKind>().map_err(|e| e.to_string()),
    }
}

fn aggregate_failure(e: AggregateError) -> (StatusCode, String) {
    tracing::error!("Aggregation failed: {}", e);
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

/// Dashboard page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Selector options and the default date span
pub async fn get_options(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let options = state.dashboard_service.options();
    respond(StatusCode::OK, &options, accepts_brotli(&headers)).await
}

/// Chart data for the selected analysis kind and date range
pub async fn get_chart(
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    let kind = match parse_analysis(query.analysis.as_deref()) {
        Ok(kind) => kind,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message, compress).await,
    };
    let range = state.dashboard_service.resolve_range(query.start, query.end);

    match state.dashboard_service.chart(kind, &range) {
        Ok(chart) => respond(StatusCode::OK, &chart, compress).await,
        Err(e) => {
            let (status, message) = aggregate_failure(e);
            error_response(status, message, compress).await
        }
    }
}

/// Answer a free-text question about the selected data
pub async fn post_insights(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<InsightsBody>,
) -> Response {
    let compress = accepts_brotli(&headers);

    let analysis = match parse_analysis(Some(&body.analysis)) {
        Ok(kind) => kind,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message, compress).await,
    };
    let request = InsightRequest {
        query: body.query,
        n_clicks: body.n_clicks,
        analysis,
        range: state.dashboard_service.resolve_range(body.start, body.end),
    };

    match state.insights_service.generate(&request).await {
        Ok(panel) => respond(StatusCode::OK, &PanelView::from(panel), compress).await,
        Err(e) => {
            let (status, message) = aggregate_failure(e);
            error_response(status, message, compress).await
        }
    }
}
