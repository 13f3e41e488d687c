//! The agent bridge: one question in, one answer (or one error) out.
//!
//! Runs the model's tool-calling loop against the database toolkit under
//! a hard deadline. Whatever goes wrong inside the loop, the caller sees
//! exactly one error: a timeout, or an agent failure carrying the
//! underlying message.

use tokio::time::timeout;
use tracing::{debug, info};

use crate::db::{DatabaseClient, SchemaMap};
use crate::error::{ChatError, Result};
use crate::llm::{LlmClient, Message};

use super::prompt::build_system_prompt;
use super::toolkit::SqlToolkit;

/// Upper bound on tool rounds per question, to keep a confused model
/// from looping forever under the deadline.
const MAX_TOOL_ROUNDS: usize = 8;

/// Drives one question through the model and its database tools.
pub struct AgentBridge {
    llm: Box<dyn LlmClient>,
    db: Box<dyn DatabaseClient>,
    schema: SchemaMap,
    timeout_secs: u64,
}

impl AgentBridge {
    /// Creates a bridge over the given clients and schema snapshot.
    pub fn new(
        llm: Box<dyn LlmClient>,
        db: Box<dyn DatabaseClient>,
        schema: SchemaMap,
        timeout_secs: u64,
    ) -> Self {
        Self {
            llm,
            db,
            schema,
            timeout_secs,
        }
    }

    /// Answers a single question, returning the model's final text.
    ///
    /// Runs under the configured deadline; on expiry the result is
    /// `ChatError::Timeout`. Every other failure inside the loop is
    /// collapsed into `ChatError::Agent`.
    pub async fn ask(&self, question: &str) -> Result<String> {
        info!(question, "Processing question");

        let deadline = std::time::Duration::from_secs(self.timeout_secs);
        match timeout(deadline, self.run_loop(question)).await {
            Ok(Ok(answer)) => Ok(answer),
            Ok(Err(e)) => Err(ChatError::agent(e.to_string())),
            Err(_) => Err(ChatError::Timeout(self.timeout_secs)),
        }
    }

    async fn run_loop(&self, question: &str) -> Result<String> {
        let toolkit = SqlToolkit::new(self.db.as_ref());
        let tools = toolkit.definitions();

        let mut transcript = vec![
            Message::system(build_system_prompt(&self.schema)),
            Message::user(question),
        ];

        for round in 0..MAX_TOOL_ROUNDS {
            let response = self.llm.complete_with_tools(&transcript, &tools).await?;

            if !response.has_tool_calls() {
                debug!(round, "Agent finished");
                return Ok(response.content);
            }

            transcript.push(Message::assistant_tool_calls(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            for call in &response.tool_calls {
                let result = toolkit.execute(&call.name, &call.arguments).await?;
                transcript.push(Message::tool_result(call.id.clone(), result));
            }
        }

        Err(ChatError::agent(format!(
            "no answer after {MAX_TOOL_ROUNDS} tool rounds"
        )))
    }

    /// Releases the underlying database connection.
    pub async fn close(&self) -> Result<()> {
        self.db.close().await
    }
}
