//! LLM agent over the SQL toolkit.
//!
//! Wires the model, the database tools, and the schema snapshot into a
//! single ask-a-question interface used by the UI and headless mode.

mod bridge;
mod prompt;
mod toolkit;

pub use bridge::AgentBridge;
pub use prompt::build_system_prompt;
pub use toolkit::SqlToolkit;
