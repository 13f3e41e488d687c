//! LLM integration for db-chat.
//!
//! Provides the client trait and implementations for communicating with
//! the hosted model.

pub mod groq;
pub mod mock;
pub mod types;

pub use groq::GroqClient;
pub use mock::MockLlmClient;
pub use types::{LlmResponse, Message, Role, ToolCall, ToolDefinition};

use crate::error::Result;
use async_trait::async_trait;

/// Trait for LLM clients that can generate tool-calling completions.
///
/// Implementations must be thread-safe (Send + Sync) to support running
/// inside spawned tasks.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given conversation, offering the
    /// given tools. The transcript may already contain assistant tool
    /// calls and their tool results from earlier rounds.
    async fn complete_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<LlmResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_implements_trait() {
        let client: Box<dyn LlmClient> = Box::new(MockLlmClient::with_answer("42"));
        let messages = vec![Message::user("how many users are there?")];
        let response = client.complete_with_tools(&messages, &[]).await.unwrap();
        assert_eq!(response.content, "42");
    }
}
