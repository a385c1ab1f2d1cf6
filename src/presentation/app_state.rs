// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::insights_service::InsightsService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub insights_service: InsightsService,
}
