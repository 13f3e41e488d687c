//! TUI application state tests.

use db_chat::db::{SchemaMap, TableSchema};
use db_chat::error::ChatError;
use db_chat::tui::{App, ChatMessage};

fn app_with_schema(schema: SchemaMap) -> App {
    App::new(schema, "shop@localhost:3306/shop")
}

#[test]
fn test_empty_submission_does_nothing() {
    let mut app = app_with_schema(SchemaMap::new());
    let before = app.messages.len();

    assert!(app.submit_input().is_none());

    app.input.text = "  \t ".to_string();
    app.input.cursor = app.input.text.len();
    assert!(app.submit_input().is_none());

    assert_eq!(app.messages.len(), before);
    assert!(!app.is_processing);
}

#[test]
fn test_submission_while_processing_is_ignored() {
    let mut app = app_with_schema(SchemaMap::new());
    app.start_processing("first question".to_string());

    app.input.text = "second question".to_string();
    app.input.cursor = app.input.text.len();
    assert!(app.submit_input().is_none());
    // The typed text stays in the input for later
    assert_eq!(app.input.text, "second question");
}

#[test]
fn test_answer_is_displayed() {
    let mut app = app_with_schema(SchemaMap::new());
    app.start_processing("how many users are there?".to_string());
    app.finish_processing(Ok("42".to_string()));

    match app.messages.last() {
        Some(ChatMessage::Answer(text)) => assert_eq!(text, "42"),
        other => panic!("expected an answer, got {other:?}"),
    }
    assert!(!app.is_processing);
    assert!(app.spinner.is_none());
}

#[test]
fn test_error_is_displayed_with_its_message() {
    let mut app = app_with_schema(SchemaMap::new());
    app.start_processing("anything".to_string());
    app.finish_processing(Err(ChatError::agent("boom")));

    match app.messages.last() {
        Some(ChatMessage::Error(text)) => assert!(text.contains("boom")),
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn test_empty_schema_is_a_warning_not_an_error() {
    let app = app_with_schema(SchemaMap::new());

    // The shell starts normally; only the sidebar reflects the missing
    // schema.
    assert!(app.running);
    assert!(app.schema.is_empty());
    assert!(!app
        .messages
        .iter()
        .any(|m| matches!(m, ChatMessage::Error(_))));
}

#[test]
fn test_schema_snapshot_reaches_the_sidebar_state() {
    let schema = SchemaMap::from_tables(vec![TableSchema::new(
        "users",
        vec!["id".into(), "email".into()],
    )]);
    let app = app_with_schema(schema);

    assert_eq!(app.schema.table_names(), vec!["users"]);
}
