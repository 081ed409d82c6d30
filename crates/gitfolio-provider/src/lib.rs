//! Language-model provider abstraction and the Anthropic implementation.

pub mod anthropic;
pub mod message;
pub mod provider;
pub mod retry;

pub use anthropic::AnthropicProvider;
pub use message::{
    ChatRequest, ChatResponse, Choice, Content, ContentPart, Message, Role, ToolDefinition,
    ToolResultPart, ToolUse, Usage,
};
pub use provider::{Provider, ProviderError};
pub use retry::{with_retry, IsRetryable, RetryConfig};
