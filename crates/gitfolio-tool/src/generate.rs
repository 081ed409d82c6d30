use async_trait::async_trait;
use serde_json::json;

use gitfolio_github::ProfilePayload;
use gitfolio_render::{render, PortfolioView};

use crate::{Tool, ToolContext, ToolError, ToolResult};

/// Renders the full portfolio page from a profile payload.
pub struct GeneratePortfolioTool;

#[async_trait]
impl Tool for GeneratePortfolioTool {
    fn id(&self) -> &str {
        "generate_portfolio_website"
    }

    fn description(&self) -> &str {
        "Generate a complete portfolio website from GitHub profile data. Expects a 'profile_data' object with 'profile', 'repos' and optionally 'skills' keys. Returns the full HTML document."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "profile_data": {
                    "type": "object",
                    "description": "Profile data with 'profile', 'repos' and optional 'skills' keys"
                }
            },
            "required": ["profile_data"]
        })
    }

    fn validate(&self, args: &serde_json::Value) -> Result<(), ToolError> {
        if !args.get("profile_data").map(|v| v.is_object()).unwrap_or(false) {
            return Err(ToolError::InvalidArguments(
                "missing required object field 'profile_data'".to_string(),
            ));
        }
        Ok(())
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let data = args
            .get("profile_data")
            .cloned()
            .ok_or_else(|| ToolError::InvalidArguments("missing 'profile_data'".to_string()))?;
        let payload: ProfilePayload = serde_json::from_value(data)
            .map_err(|e| ToolError::InvalidArguments(format!("malformed profile data: {e}")))?;

        let view = PortfolioView::build(&payload);
        let html = render(&view);
        Ok(
            ToolResult::simple(format!("Portfolio for {}", view.name), html)
                .with_metadata("repo_count", json!(view.repos.len())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn renders_payload_into_document() {
        let tool = GeneratePortfolioTool;
        let ctx = ToolContext::new(Arc::new(gitfolio_github::GithubClient::new(None)));
        let args = json!({
            "profile_data": {
                "profile": {"login": "ada", "name": "Ada", "avatar_url": "", "html_url": ""},
                "repos": [{"name": "x", "language": "Rust", "stars": 10, "html_url": ""}]
            }
        });
        let result = tool.execute(args, ctx).await.unwrap();
        assert!(result.output.starts_with("<!DOCTYPE html>"));
        assert!(result.output.contains("Ada"));
        assert!(result.output.contains("x"));
    }

    #[test]
    fn profile_data_must_be_an_object() {
        let tool = GeneratePortfolioTool;
        assert!(tool.validate(&json!({"profile_data": "nope"})).is_err());
        assert!(tool.validate(&json!({"profile_data": {}})).is_ok());
    }
}
