use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use gitfolio_github::GithubClient;

pub type Metadata = HashMap<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Cancelled")]
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ToolResult {
    pub title: String,
    pub output: String,
    pub metadata: Metadata,
}

impl ToolResult {
    pub fn simple(title: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            output: output.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Shared state passed to every tool execution.
#[derive(Clone)]
pub struct ToolContext {
    pub github: Arc<GithubClient>,
    pub cancellation: CancellationToken,
}

impl ToolContext {
    pub fn new(github: Arc<GithubClient>) -> Self {
        Self {
            github,
            cancellation: CancellationToken::new(),
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn id(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters(&self) -> serde_json::Value;

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError>;

    fn validate(&self, args: &serde_json::Value) -> Result<(), ToolError> {
        let _ = args;
        Ok(())
    }
}

/// Pulls a required string argument out of a tool input object.
pub(crate) fn require_str<'a>(
    args: &'a serde_json::Value,
    field: &str,
) -> Result<&'a str, ToolError> {
    args.get(field)
        .and_then(|v| v.as_str())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing required field '{field}'")))
}
