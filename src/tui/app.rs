//! Application state for the TUI.
//!
//! Contains the main App struct and related types for managing UI state.

use crate::db::SchemaMap;
use crate::error::ChatError;

use super::widgets::spinner::Spinner;

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Chat,
    Sidebar,
}

impl Focus {
    /// Cycles to the next focus panel.
    pub fn next(self) -> Self {
        match self {
            Self::Input => Self::Chat,
            Self::Chat => Self::Sidebar,
            Self::Sidebar => Self::Input,
        }
    }
}

/// A message in the chat panel.
#[derive(Debug, Clone)]
pub enum ChatMessage {
    /// A question from the user.
    User(String),
    /// An answer from the agent.
    Answer(String),
    /// An error shown in place of an answer.
    Error(String),
    /// A system message (welcome text, notices).
    System(String),
}

impl ChatMessage {
    /// Returns the message type as a string for display purposes.
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::User(_) => "You",
            Self::Answer(_) => "Assistant",
            Self::Error(_) => "Error",
            Self::System(_) => "System",
        }
    }
}

/// Input state for text editing.
///
/// The cursor is a character index, not a byte index; questions contain
/// whatever the user's language needs, so every edit converts to the
/// matching byte offset before touching the string.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the byte offset of the cursor's character position.
    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Returns the number of characters in the input.
    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let index = self.byte_index();
        self.text.insert(index, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index();
            self.text.remove(index);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let index = self.byte_index();
            self.text.remove(index);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start of the input.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the input.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clears the input and returns the previous text.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Current focus panel.
    pub focus: Focus,
    /// Input field state.
    pub input: InputState,
    /// Chat messages.
    pub messages: Vec<ChatMessage>,
    /// Chat scroll offset (lines from bottom).
    pub chat_scroll: usize,
    /// Sidebar scroll offset.
    pub sidebar_scroll: usize,
    /// Schema snapshot for the sidebar.
    pub schema: SchemaMap,
    /// Database connection info for the header.
    pub connection_info: String,
    /// Whether a question is being processed.
    pub is_processing: bool,
    /// Spinner shown while processing.
    pub spinner: Option<Spinner>,
}

impl App {
    /// Creates a new App instance.
    pub fn new(schema: SchemaMap, connection_info: impl Into<String>) -> Self {
        let messages = vec![ChatMessage::System(
            "Ask questions about your database in natural language.".to_string(),
        )];

        Self {
            running: true,
            focus: Focus::default(),
            input: InputState::new(),
            messages,
            chat_scroll: 0,
            sidebar_scroll: 0,
            schema,
            connection_info: connection_info.into(),
            is_processing: false,
            spinner: None,
        }
    }

    /// Adds a message to the chat and scrolls to the bottom.
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.chat_scroll = 0;
    }

    /// Clears all chat messages.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.chat_scroll = 0;
    }

    /// Submits the current input for processing.
    ///
    /// Returns `None` for empty input or while a question is already in
    /// flight, so submissions never overlap.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.is_processing || self.input.text.trim().is_empty() {
            return None;
        }
        Some(self.input.take())
    }

    /// Records that a question was sent to the agent.
    pub fn start_processing(&mut self, question: String) {
        self.add_message(ChatMessage::User(question));
        self.is_processing = true;
        self.spinner = Some(Spinner::thinking());
    }

    /// Records the agent's outcome for the in-flight question.
    pub fn finish_processing(&mut self, result: Result<String, ChatError>) {
        self.is_processing = false;
        self.spinner = None;
        match result {
            Ok(answer) => self.add_message(ChatMessage::Answer(answer)),
            Err(e) => self.add_message(ChatMessage::Error(e.to_string())),
        }
    }

    /// Handles a key event and updates application state.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        match key.code {
            // Exit commands
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Clear chat
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_messages();
            }

            // Focus switching
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }

            // Input handling (when input is focused); Enter is handled
            // by the event loop because submission spawns a task.
            _ if self.focus == Focus::Input => {
                self.handle_input_key(key);
            }

            // Chat scrolling (when chat is focused)
            KeyCode::Up if self.focus == Focus::Chat => {
                self.chat_scroll = self.chat_scroll.saturating_add(1);
            }
            KeyCode::Down if self.focus == Focus::Chat => {
                self.chat_scroll = self.chat_scroll.saturating_sub(1);
            }
            KeyCode::PageUp if self.focus == Focus::Chat => {
                self.chat_scroll = self.chat_scroll.saturating_add(10);
            }
            KeyCode::PageDown if self.focus == Focus::Chat => {
                self.chat_scroll = self.chat_scroll.saturating_sub(10);
            }
            KeyCode::End if self.focus == Focus::Chat => {
                self.chat_scroll = 0;
            }

            // Sidebar scrolling (when sidebar is focused)
            KeyCode::Up if self.focus == Focus::Sidebar => {
                self.sidebar_scroll = self.sidebar_scroll.saturating_add(1);
            }
            KeyCode::Down if self.focus == Focus::Sidebar => {
                self.sidebar_scroll = self.sidebar_scroll.saturating_sub(1);
            }

            _ => {}
        }
    }

    /// Handles key events when input is focused.
    fn handle_input_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }
}
