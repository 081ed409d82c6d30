use async_trait::async_trait;
use serde_json::json;

use crate::tool::require_str;
use crate::{Tool, ToolContext, ToolError, ToolResult};

/// Fetches a user profile together with their most recent repositories.
pub struct FetchGithubProfileTool;

#[async_trait]
impl Tool for FetchGithubProfileTool {
    fn id(&self) -> &str {
        "fetch_github_profile"
    }

    fn description(&self) -> &str {
        "Fetch a GitHub user's profile information and their most recently updated repositories. Returns a JSON object with 'profile' and 'repos' keys."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "The GitHub username to look up"
                }
            },
            "required": ["username"]
        })
    }

    fn validate(&self, args: &serde_json::Value) -> Result<(), ToolError> {
        require_str(args, "username").map(|_| ())
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let username = require_str(&args, "username")?;

        let profile = ctx
            .github
            .fetch_profile(username)
            .await
            .map_err(|e| ToolError::ExecutionError(e.to_string()))?;
        let repos = ctx
            .github
            .fetch_repos(username)
            .await
            .map_err(|e| ToolError::ExecutionError(e.to_string()))?;

        let payload = json!({
            "profile": profile,
            "repos": repos,
        });
        let output = serde_json::to_string_pretty(&payload)
            .map_err(|e| ToolError::ExecutionError(e.to_string()))?;
        Ok(ToolResult::simple(format!("Profile: {username}"), output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_username_fails_validation() {
        let tool = FetchGithubProfileTool;
        assert!(tool.validate(&json!({})).is_err());
        assert!(tool.validate(&json!({"username": ""})).is_err());
        assert!(tool.validate(&json!({"username": "ada"})).is_ok());
    }
}
