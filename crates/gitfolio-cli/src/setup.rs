use std::path::PathBuf;
use std::sync::Arc;

use gitfolio_agent::AgentExecutor;
use gitfolio_config::Config;
use gitfolio_github::GithubClient;
use gitfolio_provider::AnthropicProvider;
use gitfolio_session::PortfolioSession;
use gitfolio_tool::{create_default_registry, ToolContext};

/// Builds a ready session from layered configuration.
pub(crate) async fn build_session(
    config: Config,
    output_override: Option<PathBuf>,
) -> anyhow::Result<PortfolioSession> {
    let api_key = config.anthropic_api_key.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "No Anthropic API key configured. Set ANTHROPIC_API_KEY or add \"anthropicApiKey\" to the config file."
        )
    })?;

    let provider = Arc::new(AnthropicProvider::new(api_key));
    let registry = Arc::new(create_default_registry().await);
    let github = Arc::new(GithubClient::new(config.github_token.clone()));
    let tool_ctx = ToolContext::new(github);

    let executor = AgentExecutor::new(provider, registry, tool_ctx, config.model());
    let output_dir = output_override.unwrap_or_else(|| config.output_dir());

    Ok(PortfolioSession::new(Arc::new(executor), output_dir))
}
