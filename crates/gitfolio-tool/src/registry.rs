use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Tool, ToolContext, ToolError, ToolResult};

#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register<T: Tool + 'static>(&self, tool: T) {
        let mut tools = self.tools.write().await;
        tools.insert(tool.id().to_string(), Arc::new(tool));
    }

    pub async fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(id).cloned()
    }

    pub async fn list_ids(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut ids: Vec<String> = tools.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn list_schemas(&self) -> Vec<ToolSchema> {
        let tools = self.tools.read().await;
        let mut schemas: Vec<ToolSchema> = tools
            .values()
            .map(|t| ToolSchema {
                name: t.id().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub async fn execute(
        &self,
        id: &str,
        args: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        if ctx.cancellation.is_cancelled() {
            return Err(ToolError::Cancelled);
        }
        let tool = self
            .get(id)
            .await
            .ok_or_else(|| ToolError::NotFound(id.to_string()))?;
        tool.validate(&args)?;
        tracing::debug!(tool = id, "executing tool");
        tool.execute(args, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with the full portfolio tool set.
pub async fn create_default_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry
        .register(crate::profile::FetchGithubProfileTool)
        .await;
    registry
        .register(crate::structure::FetchRepoStructureTool)
        .await;
    registry.register(crate::content::FetchFileContentTool).await;
    registry
        .register(crate::generate::GeneratePortfolioTool)
        .await;
    registry
        .register(crate::repair_tool::CompleteHtmlStructureTool)
        .await;
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_registry_has_all_tools() {
        let registry = create_default_registry().await;
        let ids = registry.list_ids().await;
        assert_eq!(
            ids,
            vec![
                "complete_html_structure",
                "fetch_file_content",
                "fetch_github_profile",
                "fetch_repo_structure",
                "generate_portfolio_website",
            ]
        );
    }

    #[tokio::test]
    async fn unknown_tool_reports_not_found() {
        let registry = ToolRegistry::new();
        let ctx = ToolContext::new(std::sync::Arc::new(gitfolio_github::GithubClient::new(None)));
        let err = registry
            .execute("nope", serde_json::json!({}), ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn cancelled_context_short_circuits() {
        let registry = create_default_registry().await;
        let ctx = ToolContext::new(std::sync::Arc::new(gitfolio_github::GithubClient::new(None)));
        ctx.cancellation.cancel();
        let err = registry
            .execute("complete_html_structure", serde_json::json!({"html_content": "<p>x</p>"}), ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Cancelled));
    }
}
