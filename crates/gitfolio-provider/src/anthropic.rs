use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::message::{
    ChatRequest, ChatResponse, Choice, Content, ContentPart, Message, Role, ToolUse, Usage,
};
use crate::provider::{Provider, ProviderError};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MAX_TOKENS: u64 = 8192;

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: Option<String>,
}

#[derive(Debug)]
pub struct AnthropicProvider {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(AnthropicConfig {
            api_key: api_key.into(),
            base_url: None,
        })
    }

    pub fn with_config(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn convert_request(&self, request: ChatRequest) -> AnthropicRequest {
        let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        let mut messages = Vec::new();

        for msg in request.messages {
            let mut content = Vec::new();
            match msg.content {
                Content::Text(text) => {
                    if !text.is_empty() {
                        content.push(AnthropicContent::Text { text });
                    }
                }
                Content::Parts(parts) => {
                    for part in parts {
                        if let Some(text) = part.text {
                            if !text.is_empty() {
                                content.push(AnthropicContent::Text { text });
                            }
                        }
                        if let Some(tool_use) = part.tool_use {
                            content.push(AnthropicContent::ToolUse {
                                id: tool_use.id,
                                name: tool_use.name,
                                input: tool_use.input,
                            });
                        }
                        if let Some(tool_result) = part.tool_result {
                            content.push(AnthropicContent::ToolResult {
                                tool_use_id: tool_result.tool_use_id,
                                content: tool_result.content,
                                is_error: tool_result.is_error,
                            });
                        }
                    }
                }
            }

            if content.is_empty() {
                continue;
            }

            messages.push(AnthropicMessage {
                role: match msg.role {
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                },
                content,
            });
        }

        let tools = request.tools.and_then(|tools| {
            if tools.is_empty() {
                None
            } else {
                Some(
                    tools
                        .into_iter()
                        .map(|tool| AnthropicTool {
                            name: tool.name,
                            description: tool.description,
                            input_schema: tool.parameters,
                        })
                        .collect(),
                )
            }
        });

        AnthropicRequest {
            model: request.model,
            max_tokens,
            messages,
            system: request.system,
            tools,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn id(&self) -> &str {
        "anthropic"
    }

    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let anthropic_request = self.convert_request(request);
        let url = self.config.base_url.as_deref().unwrap_or(ANTHROPIC_API_URL);

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthError(body),
                429 => ProviderError::RateLimit,
                code => ProviderError::ApiErrorWithStatus {
                    message: body,
                    status_code: code,
                },
            });
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(e.to_string()))?;

        Ok(convert_response(anthropic_response))
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u64,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<AnthropicTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Serialize)]
struct AnthropicTool {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    input_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum AnthropicContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    model: String,
    content: Vec<AnthropicResponseContent>,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: AnthropicResponseUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponseContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponseUsage {
    input_tokens: u64,
    output_tokens: u64,
}

fn convert_response(response: AnthropicResponse) -> ChatResponse {
    let mut parts = Vec::new();
    for block in response.content {
        match block.content_type.as_str() {
            "text" => {
                if let Some(text) = block.text {
                    parts.push(ContentPart {
                        text: Some(text),
                        ..Default::default()
                    });
                }
            }
            "tool_use" => {
                if let (Some(id), Some(name)) = (block.id, block.name) {
                    parts.push(ContentPart {
                        tool_use: Some(ToolUse {
                            id,
                            name,
                            input: block.input.unwrap_or(serde_json::Value::Null),
                        }),
                        ..Default::default()
                    });
                }
            }
            _ => {}
        }
    }

    ChatResponse {
        id: response.id,
        model: response.model,
        choices: vec![Choice {
            index: 0,
            message: Message {
                role: Role::Assistant,
                content: Content::Parts(parts),
            },
            finish_reason: response.stop_reason,
        }],
        usage: Some(Usage {
            prompt_tokens: response.usage.input_tokens,
            completion_tokens: response.usage.output_tokens,
            total_tokens: response.usage.input_tokens + response.usage.output_tokens,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_use_blocks_survive_conversion() {
        let raw = serde_json::json!({
            "id": "msg_1",
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "text", "text": "fetching"},
                {"type": "tool_use", "id": "toolu_1", "name": "fetch_github_profile",
                 "input": {"username": "ada"}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        });
        let response: AnthropicResponse = serde_json::from_value(raw).unwrap();
        let converted = convert_response(response);
        assert_eq!(converted.text(), "fetching");
        let uses = converted.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].name, "fetch_github_profile");
        assert_eq!(uses[0].input["username"], "ada");
    }
}
