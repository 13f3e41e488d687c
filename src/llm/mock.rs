//! Mock LLM client for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ChatError, Result};
use crate::llm::types::{LlmResponse, Message, Role, ToolCall, ToolDefinition};
use crate::llm::LlmClient;

/// What the mock should do when asked for a completion.
#[derive(Debug, Clone)]
enum Behavior {
    /// Answer immediately with fixed text.
    Answer(String),
    /// Fail with an LLM error carrying this message.
    Fail(String),
    /// Issue a tool call first, then answer with fixed text once a
    /// tool result appears in the transcript.
    ToolCallThenAnswer { call: ToolCall, answer: String },
}

/// A mock LLM client with scripted behavior.
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    behavior: Behavior,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockLlmClient {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a mock that always answers with the given text.
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Answer(answer.into()))
    }

    /// Creates a mock that always fails with the given message.
    pub fn with_failure(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// Creates a mock that calls the named tool with the given arguments,
    /// then answers once the tool result is in the transcript.
    pub fn with_tool_call(
        name: impl Into<String>,
        arguments: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self::with_behavior(Behavior::ToolCallThenAnswer {
            call: ToolCall {
                id: "call_mock_1".to_string(),
                name: name.into(),
                arguments: arguments.into(),
            },
            answer: answer.into(),
        })
    }

    /// Adds an artificial delay before every completion.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns a handle to the completion-call counter, usable after the
    /// client has been boxed away.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete_with_tools(
        &self,
        messages: &[Message],
        _tools: &[ToolDefinition],
    ) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Answer(answer) => Ok(LlmResponse::text(answer.clone())),
            Behavior::Fail(message) => Err(ChatError::llm(message.clone())),
            Behavior::ToolCallThenAnswer { call, answer } => {
                let has_tool_result = messages.iter().any(|m| m.role == Role::Tool);
                if has_tool_result {
                    Ok(LlmResponse::text(answer.clone()))
                } else {
                    Ok(LlmResponse::with_tool_calls("", vec![call.clone()]))
                }
            }
        }
    }
}
