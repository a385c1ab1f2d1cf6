// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_chart, get_options, health_check, index, post_insights};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/api/options", get(get_options))
        .route("/api/chart", get(get_chart))
        .route("/api/insights", post(post_insights))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
