// Chat-completion boundary used by the insights use case
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Stable identifier for the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Transport(_) => "transport",
            LlmError::Auth(_) => "auth",
            LlmError::RateLimited(_) => "rate_limited",
            LlmError::InvalidResponse(_) => "invalid_response",
        }
    }
}

#[async_trait]
pub trait InsightsClient: Send + Sync {
    /// Send one system instruction and one user prompt, returning the raw reply text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records prompts and answers with a canned reply.
    pub struct MockInsightsClient {
        reply: Result<String, LlmError>,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl MockInsightsClient {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: LlmError) -> Self {
            Self {
                reply: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl InsightsClient for MockInsightsClient {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            self.reply.clone()
        }
    }
}
