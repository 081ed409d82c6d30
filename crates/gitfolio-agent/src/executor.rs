use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gitfolio_provider::{
    with_retry, ChatRequest, Content, ContentPart, Message, Provider, Role, RetryConfig,
    ToolDefinition, ToolResultPart,
};
use gitfolio_tool::{ToolContext, ToolRegistry};

use crate::agent::{Agent, AgentError};

const DEFAULT_MAX_STEPS: usize = 12;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that analyzes GitHub repositories and creates a portfolio website for the user. \
To analyze repositories, use these tools:\n\
- fetch_repo_structure: Get the repository file structure\n\
- fetch_file_content: Get content of specific files\n\
To avoid context window limits, only analyze 2-5 key files that best represent the project. \
Provide a concise summary of the repository and its main components, dependencies, and how the code is organized.\n\
You can also create professional portfolio websites for users from GitHub profiles. \
To generate portfolios, use these tools in sequence:\n\
- fetch_github_profile: Get the user's GitHub profile data\n\
- fetch_repo_structure: Get structure of the user's repositories\n\
- fetch_file_content: Get content from key repository files\n\
- generate_portfolio_website: Generate the final portfolio HTML\n\
- complete_html_structure: Validate and fix any incomplete HTML structure\n\
The portfolio should showcase:\n\
- The user's repositories\n\
- Skills (based on repository languages)\n\
- Contact information\n\
- Professional design with responsive layout\n\
Maintain conversation history to handle follow-up questions and remember context from previous interactions.";

/// Drives the provider/tool loop for one agent. Conversation history is
/// kept across calls so follow-up prompts retain context.
pub struct AgentExecutor {
    provider: Arc<dyn Provider>,
    registry: Arc<ToolRegistry>,
    tool_ctx: ToolContext,
    model: String,
    max_steps: usize,
    retry: RetryConfig,
    history: Mutex<Vec<Message>>,
}

impl AgentExecutor {
    pub fn new(
        provider: Arc<dyn Provider>,
        registry: Arc<ToolRegistry>,
        tool_ctx: ToolContext,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            registry,
            tool_ctx,
            model: model.into(),
            max_steps: DEFAULT_MAX_STEPS,
            retry: RetryConfig::default(),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }

    async fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .list_schemas()
            .await
            .into_iter()
            .map(|schema| ToolDefinition {
                name: schema.name,
                description: Some(schema.description),
                parameters: schema.parameters,
            })
            .collect()
    }
}

#[async_trait]
impl Agent for AgentExecutor {
    async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        let mut messages = self.history.lock().await;
        messages.push(Message::user(prompt));
        let tools = self.tool_definitions().await;

        for step in 0..self.max_steps {
            let request = ChatRequest::new(&self.model, messages.clone())
                .with_system(SYSTEM_PROMPT)
                .with_tools(tools.clone());

            let response = with_retry(&self.retry, || {
                self.provider.chat(request.clone())
            })
            .await?;

            let text = response.text();
            let tool_uses: Vec<_> = response.tool_uses().into_iter().cloned().collect();

            if tool_uses.is_empty() {
                messages.push(Message::assistant(&text));
                return Ok(text);
            }

            tracing::debug!(step, count = tool_uses.len(), "executing tool calls");

            // Echo the assistant turn, tool_use blocks included, before the
            // results so the transcript stays coherent.
            let mut assistant_parts = Vec::new();
            if !text.is_empty() {
                assistant_parts.push(ContentPart {
                    text: Some(text),
                    ..Default::default()
                });
            }
            for tool_use in &tool_uses {
                assistant_parts.push(ContentPart {
                    tool_use: Some(tool_use.clone()),
                    ..Default::default()
                });
            }
            messages.push(Message {
                role: Role::Assistant,
                content: Content::Parts(assistant_parts),
            });

            let mut results = Vec::new();
            for tool_use in tool_uses {
                let outcome = self
                    .registry
                    .execute(&tool_use.name, tool_use.input.clone(), self.tool_ctx.clone())
                    .await;
                results.push(match outcome {
                    Ok(result) => ToolResultPart {
                        tool_use_id: tool_use.id,
                        content: result.output,
                        is_error: None,
                    },
                    Err(e) => {
                        tracing::warn!(tool = %tool_use.name, error = %e, "tool failed");
                        ToolResultPart {
                            tool_use_id: tool_use.id,
                            content: e.to_string(),
                            is_error: Some(true),
                        }
                    }
                });
            }
            messages.push(Message::tool_results(results));
        }

        Err(AgentError::MaxStepsExceeded(self.max_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitfolio_provider::{ChatResponse, Choice, ProviderError, ToolUse, Usage};
    use gitfolio_tool::create_default_registry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedProvider {
        responses: Vec<ChatResponse>,
        call: AtomicUsize,
    }

    fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            id: String::new(),
            model: String::new(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(text),
                finish_reason: Some("end_turn".to_string()),
            }],
            usage: Some(Usage {
                prompt_tokens: 0,
                completion_tokens: 0,
                total_tokens: 0,
            }),
        }
    }

    fn tool_response(name: &str, input: serde_json::Value) -> ChatResponse {
        ChatResponse {
            id: String::new(),
            model: String::new(),
            choices: vec![Choice {
                index: 0,
                message: Message {
                    role: Role::Assistant,
                    content: Content::Parts(vec![ContentPart {
                        tool_use: Some(ToolUse {
                            id: "toolu_1".to_string(),
                            name: name.to_string(),
                            input,
                        }),
                        ..Default::default()
                    }]),
                },
                finish_reason: Some("tool_use".to_string()),
            }],
            usage: None,
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn id(&self) -> &str {
            "scripted"
        }

        fn name(&self) -> &str {
            "Scripted"
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, ProviderError> {
            let n = self.call.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(n)
                .cloned()
                .ok_or_else(|| ProviderError::ApiError("script exhausted".to_string()))
        }
    }

    async fn executor(responses: Vec<ChatResponse>) -> AgentExecutor {
        let provider = Arc::new(ScriptedProvider {
            responses,
            call: AtomicUsize::new(0),
        });
        let registry = Arc::new(create_default_registry().await);
        let ctx = ToolContext::new(Arc::new(gitfolio_github::GithubClient::new(None)));
        AgentExecutor::new(provider, registry, ctx, "test-model")
    }

    #[tokio::test]
    async fn plain_answer_passes_through() {
        let exec = executor(vec![text_response("hello there")]).await;
        assert_eq!(exec.run("hi").await.unwrap(), "hello there");
    }

    #[tokio::test]
    async fn tool_round_trip_reaches_final_answer() {
        let exec = executor(vec![
            tool_response(
                "complete_html_structure",
                serde_json::json!({"html_content": "<p>hi</p>"}),
            ),
            text_response("done"),
        ])
        .await;
        assert_eq!(exec.run("fix this").await.unwrap(), "done");
    }

    #[tokio::test]
    async fn runaway_tool_loop_hits_step_limit() {
        let looping: Vec<ChatResponse> = (0..4)
            .map(|_| {
                tool_response(
                    "complete_html_structure",
                    serde_json::json!({"html_content": "<p>hi</p>"}),
                )
            })
            .collect();
        let exec = executor(looping).await.with_max_steps(3);
        let err = exec.run("loop forever").await.unwrap_err();
        assert!(matches!(err, AgentError::MaxStepsExceeded(3)));
    }

    #[tokio::test]
    async fn history_carries_across_runs() {
        let exec = executor(vec![text_response("first"), text_response("second")]).await;
        exec.run("one").await.unwrap();
        exec.run("two").await.unwrap();
        let history = exec.history.lock().await;
        assert_eq!(history.len(), 4);
    }
}
