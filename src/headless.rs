//! One-shot headless mode.
//!
//! Asks the agent a single question and prints the answer to stdout.
//! Logs go to stderr, so the answer is the only thing on stdout and the
//! command composes in pipelines.

use tracing::warn;

use crate::agent::AgentBridge;
use crate::error::Result;

/// Asks one question and prints the answer.
pub async fn run(bridge: AgentBridge, question: &str) -> Result<()> {
    let result = bridge.ask(question).await;

    if let Err(e) = bridge.close().await {
        warn!("Error closing database connection: {e}");
    }

    let answer = result?;
    println!("{answer}");
    Ok(())
}
