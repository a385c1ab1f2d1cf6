// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_dataset;
pub mod http_response;
pub mod openai_client;
