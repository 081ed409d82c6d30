use async_trait::async_trait;

use gitfolio_provider::ProviderError;
use gitfolio_tool::ToolError;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("agent exceeded {0} steps without a final answer")]
    MaxStepsExceeded(usize),
}

/// Runs one prompt to completion, tool round-trips included, and returns
/// the final text. Callers see only the text; tool side effects are not
/// directly observable.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn run(&self, prompt: &str) -> Result<String, AgentError>;
}
