//! Groq LLM client implementation.
//!
//! Implements the `LlmClient` trait against Groq's OpenAI-compatible chat
//! completions endpoint, with deterministic decoding (temperature 0) and
//! tool-calling support. A request is attempted exactly once; failures are
//! reported to the caller without retrying.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::GroqConfig;
use crate::error::{ChatError, Result};
use crate::llm::types::{LlmResponse, Message, ToolCall, ToolDefinition};
use crate::llm::LlmClient;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Groq OpenAI-compatible chat completions endpoint.
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq LLM client.
#[derive(Debug, Clone)]
pub struct GroqClient {
    config: GroqConfig,
    client: Client,
}

impl GroqClient {
    /// Creates a new Groq client with the given configuration.
    pub fn new(config: GroqConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChatError::llm(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Converts internal messages to the wire format.
    fn convert_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: m.role.as_str().to_string(),
                content: Some(m.content.clone()),
                tool_calls: if m.tool_calls.is_empty() {
                    None
                } else {
                    Some(m.tool_calls.iter().map(ApiToolCall::from).collect())
                },
                tool_call_id: m.tool_call_id.clone(),
            })
            .collect()
    }

    /// Converts tool definitions to the wire format.
    fn convert_tools(tools: &[ToolDefinition]) -> Vec<ApiTool> {
        tools
            .iter()
            .map(|t| ApiTool {
                kind: "function".to_string(),
                function: ApiFunctionDef {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                },
            })
            .collect()
    }

    /// Parses an API error response into a ChatError.
    fn parse_error(status: reqwest::StatusCode, body: &str) -> ChatError {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ChatError::llm("Authentication failed. Check your GROQ_API_KEY_SQL.");
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return ChatError::llm("Rate limited by the Groq API. Please wait and try again.");
        }

        if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(body) {
            return ChatError::llm(format!("Groq API error: {}", error_response.error.message));
        }

        ChatError::llm(format!("Groq API error ({status}): {body}"))
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn complete_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<LlmResponse> {
        let request = ApiRequest {
            model: self.config.model.clone(),
            messages: Self::convert_messages(messages),
            // Deterministic decoding
            temperature: 0.0,
            tools: if tools.is_empty() {
                None
            } else {
                Some(Self::convert_tools(tools))
            },
        };

        debug!(
            model = %self.config.model,
            message_count = messages.len(),
            tool_count = tools.len(),
            "Sending Groq API request"
        );

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::llm("Request to the Groq API timed out.")
                } else if e.is_connect() {
                    ChatError::llm("Failed to connect to the Groq API. Check your network.")
                } else {
                    ChatError::llm(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::llm(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        let response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::llm(format!("Failed to parse response: {e}")))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::llm("No response from the Groq API"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}

// Wire types for the OpenAI-compatible API

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ApiTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiTool {
    #[serde(rename = "type")]
    kind: String,
    function: ApiFunctionDef,
}

#[derive(Debug, Serialize)]
struct ApiFunctionDef {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: ApiFunctionCall,
}

impl From<&ToolCall> for ApiToolCall {
    fn from(tc: &ToolCall) -> Self {
        Self {
            id: tc.id.clone(),
            kind: "function".to_string(),
            function: ApiFunctionCall {
                name: tc.name.clone(),
                arguments: tc.arguments.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
