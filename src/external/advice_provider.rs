use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("advice provider not configured")]
    Disabled,
}

/// Language-model backed advice generator. Callers substitute a static
/// apology on failure instead of propagating the error.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, AdviceError>;
}
