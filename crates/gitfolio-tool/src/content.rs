use async_trait::async_trait;
use serde_json::json;

use crate::tool::require_str;
use crate::{Tool, ToolContext, ToolError, ToolResult};

const MAX_CONTENT_CHARS: usize = 50_000;

/// Fetches the decoded text content of a single file.
pub struct FetchFileContentTool;

#[async_trait]
impl Tool for FetchFileContentTool {
    fn id(&self) -> &str {
        "fetch_file_content"
    }

    fn description(&self) -> &str {
        "Fetch the content of a file from a GitHub repository, decoded to text."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "owner": {
                    "type": "string",
                    "description": "The repository owner"
                },
                "repo": {
                    "type": "string",
                    "description": "The repository name"
                },
                "path": {
                    "type": "string",
                    "description": "The file path within the repository"
                }
            },
            "required": ["owner", "repo", "path"]
        })
    }

    fn validate(&self, args: &serde_json::Value) -> Result<(), ToolError> {
        require_str(args, "owner")?;
        require_str(args, "repo")?;
        require_str(args, "path").map(|_| ())
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let owner = require_str(&args, "owner")?;
        let repo = require_str(&args, "repo")?;
        let path = require_str(&args, "path")?;

        let mut content = ctx
            .github
            .fetch_file_content(owner, repo, path)
            .await
            .map_err(|e| ToolError::ExecutionError(e.to_string()))?;

        if content.chars().count() > MAX_CONTENT_CHARS {
            content = content.chars().take(MAX_CONTENT_CHARS).collect();
            content.push_str("\n... (truncated)");
        }
        Ok(ToolResult::simple(format!("{owner}/{repo}/{path}"), content))
    }
}
