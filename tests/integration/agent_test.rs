//! Agent bridge integration tests, driven by the mock LLM and database.

use std::sync::atomic::Ordering;
use std::time::Duration;

use db_chat::agent::AgentBridge;
use db_chat::db::{DatabaseClient, MockDatabaseClient};
use db_chat::error::ChatError;
use db_chat::llm::MockLlmClient;

async fn bridge_with(llm: MockLlmClient, timeout_secs: u64) -> AgentBridge {
    let db = MockDatabaseClient::sample();
    let schema = db.fetch_schema_map().await.unwrap();
    AgentBridge::new(Box::new(llm), Box::new(db), schema, timeout_secs)
}

#[tokio::test]
async fn test_question_yields_answer() {
    let bridge = bridge_with(MockLlmClient::with_answer("42"), 60).await;

    let answer = bridge.ask("how many users are there?").await.unwrap();
    assert_eq!(answer, "42");
}

#[tokio::test]
async fn test_agent_uses_tools_before_answering() {
    let bridge = bridge_with(
        MockLlmClient::with_tool_call("list_tables", "{}", "There are two tables."),
        60,
    )
    .await;

    let answer = bridge.ask("what tables are there?").await.unwrap();
    assert_eq!(answer, "There are two tables.");
}

#[tokio::test]
async fn test_llm_failure_surfaces_as_agent_error() {
    let bridge = bridge_with(MockLlmClient::with_failure("boom"), 60).await;

    let error = bridge.ask("anything").await.unwrap_err();
    assert!(matches!(error, ChatError::Agent(_)));
    assert!(error.to_string().contains("boom"));
}

#[tokio::test]
async fn test_slow_agent_times_out() {
    let bridge = bridge_with(
        MockLlmClient::with_answer("too late").with_delay(Duration::from_secs(10)),
        1,
    )
    .await;

    let error = bridge.ask("anything").await.unwrap_err();
    assert!(matches!(error, ChatError::Timeout(1)));
    assert!(error.to_string().contains("1 seconds"));
}

#[tokio::test]
async fn test_write_attempt_is_refused_but_agent_recovers() {
    // The model first tries a destructive statement; the toolkit refuses
    // it and feeds the refusal back, after which the model answers.
    let bridge = bridge_with(
        MockLlmClient::with_tool_call(
            "execute_query",
            r#"{"sql":"DROP TABLE users"}"#,
            "I cannot modify the database.",
        ),
        60,
    )
    .await;

    let answer = bridge.ask("drop the users table").await.unwrap();
    assert_eq!(answer, "I cannot modify the database.");
}

#[tokio::test]
async fn test_each_question_starts_a_fresh_tool_loop() {
    // With a fresh transcript per question, the tool round must replay
    // on every ask: two completions per question, not one. A transcript
    // leaking between questions would answer the second one directly.
    let llm = MockLlmClient::with_tool_call("list_tables", "{}", "There are two tables.");
    let calls = llm.call_counter();
    let bridge = bridge_with(llm, 60).await;

    let first = bridge.ask("what tables are there?").await.unwrap();
    assert_eq!(first, "There are two tables.");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let second = bridge.ask("and now?").await.unwrap();
    assert_eq!(second, "There are two tables.");
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
