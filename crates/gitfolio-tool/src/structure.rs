use async_trait::async_trait;
use serde_json::json;

use crate::tool::require_str;
use crate::{Tool, ToolContext, ToolError, ToolResult};

const MAX_LISTED_PATHS: usize = 200;

/// Lists the file paths of a repository's default branch.
pub struct FetchRepoStructureTool;

#[async_trait]
impl Tool for FetchRepoStructureTool {
    fn id(&self) -> &str {
        "fetch_repo_structure"
    }

    fn description(&self) -> &str {
        "Fetch the file structure of a GitHub repository. Returns one file path per line."
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
                }
            },
            "required": ["owner", "repo"]
        })
    }

    fn validate(&self, args: &serde_json::Value) -> Result<(), ToolError> {
        require_str(args, "owner")?;
        require_str(args, "repo").map(|_| ())
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let owner = require_str(&args, "owner")?;
        let repo = require_str(&args, "repo")?;

        let paths = ctx
            .github
            .fetch_repo_tree(owner, repo)
            .await
            .map_err(|e| ToolError::ExecutionError(e.to_string()))?;

        let total = paths.len();
        let mut output = paths
            .into_iter()
            .take(MAX_LISTED_PATHS)
            .collect::<Vec<_>>()
            .join("\n");
        if total > MAX_LISTED_PATHS {
            output.push_str(&format!("\n... and {} more files", total - MAX_LISTED_PATHS));
        }
        Ok(ToolResult::simple(format!("{owner}/{repo}"), output)
            .with_metadata("file_count", json!(total)))
    }
}
