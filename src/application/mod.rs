// Application layer - Use cases and the ports they depend on
pub mod aggregator;
pub mod dashboard_service;
pub mod insights_client;
pub mod insights_service;
pub mod prompt;
