use serde::Deserialize;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub data: DataSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub path: String,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default = "default_category_column")]
    pub category_column: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    /// Bars shown in the ranking chart.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8050".to_string()
}

fn default_date_column() -> String {
    "date".to_string()
}

fn default_value_column() -> String {
    "total_value_usd".to_string()
}

fn default_category_column() -> String {
    "sales_rep_name".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_top_n() -> usize {
    crate::application::aggregator::DEFAULT_TOP_N
}

/// Load `config/dashboard.*`, overridden by `DASHBOARD__SECTION__KEY` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    from_settings(settings)
}

fn from_settings(settings: config::Config) -> anyhow::Result<AppConfig> {
    let config: AppConfig = settings.try_deserialize()?;
    if config.dashboard.top_n == 0 {
        anyhow::bail!("dashboard.top_n must be a positive integer");
    }
    Ok(config)
}

/// Read the model provider credential, picking up a `.env` file if one exists.
pub fn load_api_key() -> anyhow::Result<String> {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    api_key_from(std::env::var(API_KEY_VAR).ok())
}

fn api_key_from(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => anyhow::bail!(
            "API key not found. Please set your {} environment variable.",
            API_KEY_VAR
        ),
    }
}
