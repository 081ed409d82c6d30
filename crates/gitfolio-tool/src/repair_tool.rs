use async_trait::async_trait;
use serde_json::json;

use gitfolio_repair::repair;

use crate::tool::require_str;
use crate::{Tool, ToolContext, ToolError, ToolResult};

/// Checks and fixes incomplete HTML structure.
pub struct CompleteHtmlStructureTool;

#[async_trait]
impl Tool for CompleteHtmlStructureTool {
    fn id(&self) -> &str {
        "complete_html_structure"
    }

    fn description(&self) -> &str {
        "Check and fix incomplete HTML structure in the provided HTML content. Returns the fixed HTML and a summary of the fixes applied."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "html_content": {
                    "type": "string",
                    "description": "The HTML content to check and fix"
                }
            },
            "required": ["html_content"]
        })
    }

    fn validate(&self, args: &serde_json::Value) -> Result<(), ToolError> {
        require_str(args, "html_content").map(|_| ())
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        _ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let html = require_str(&args, "html_content")?;
        let outcome = repair(html);
        let summary = outcome.fixes.join(", ");
        Ok(
            ToolResult::simple(format!("HTML structure checked and fixed: {summary}"), outcome.html)
                .with_metadata("fixes", json!(outcome.fixes)),
        )
    }
}
