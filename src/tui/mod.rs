//! Terminal user interface for db-chat.
//!
//! Provides the main TUI application loop using ratatui and crossterm.
//! Questions are handed to the agent on a background task so the UI
//! stays responsive; results come back over a channel.

pub mod app;
mod ui;
pub mod widgets;

pub use app::{App, ChatMessage};

use crate::agent::AgentBridge;
use crate::db::SchemaMap;
use crate::error::{ChatError, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Messages sent from background tasks to the main loop.
#[derive(Debug)]
pub enum AsyncMessage {
    /// The agent finished processing a question.
    AgentFinished(Result<String>),
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Cancels in-flight agent tasks on shutdown.
    cancel: CancellationToken,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            terminal,
            cancel: CancellationToken::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| ChatError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| ChatError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| ChatError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| ChatError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| ChatError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| ChatError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop with the given agent bridge.
    pub async fn run(
        &mut self,
        bridge: Arc<AgentBridge>,
        schema: SchemaMap,
        connection_info: String,
    ) -> Result<()> {
        // Restore the terminal on panic before the default hook prints
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let mut app_state = App::new(schema, connection_info);
        let (tx, mut rx) = mpsc::channel::<AsyncMessage>(32);

        let result = self
            .run_event_loop(&mut app_state, Arc::clone(&bridge), tx, &mut rx)
            .await;

        // Cleanup: cancel in-flight tasks and close the connection
        self.cancel.cancel();
        if let Err(e) = bridge.close().await {
            warn!("Error closing database connection: {e}");
        }

        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app_state: &mut App,
        bridge: Arc<AgentBridge>,
        tx: mpsc::Sender<AsyncMessage>,
        rx: &mut mpsc::Receiver<AsyncMessage>,
    ) -> Result<()> {
        loop {
            self.terminal
                .draw(|frame| ui::render(frame, app_state))
                .map_err(|e| ChatError::internal(format!("Failed to draw: {e}")))?;

            if !app_state.running {
                break;
            }

            tokio::select! {
                // Terminal events, polled off the async runtime
                event_result = tokio::task::spawn_blocking(|| {
                    let tick_rate = std::time::Duration::from_millis(100);
                    if crossterm::event::poll(tick_rate).unwrap_or(false) {
                        crossterm::event::read().ok()
                    } else {
                        None
                    }
                }) => {
                    if let Ok(Some(event)) = event_result {
                        self.handle_crossterm_event(event, app_state, &bridge, &tx);
                    }
                }

                // Results from background agent tasks
                Some(msg) = rx.recv() => {
                    Self::handle_async_message(msg, app_state);
                }
            }
        }

        Ok(())
    }

    /// Handles a crossterm event.
    fn handle_crossterm_event(
        &mut self,
        event: crossterm::event::Event,
        app_state: &mut App,
        bridge: &Arc<AgentBridge>,
        tx: &mpsc::Sender<AsyncMessage>,
    ) {
        use crossterm::event::Event as CEvent;

        match event {
            CEvent::Key(key) => {
                // Submission spawns a task, so it is handled here rather
                // than in App::handle_key.
                if key.code == KeyCode::Enter && app_state.focus == app::Focus::Input {
                    if let Some(question) = app_state.submit_input() {
                        app_state.start_processing(question.clone());
                        self.spawn_agent_task(question, Arc::clone(bridge), tx.clone());
                    }
                    return;
                }

                app_state.handle_key(key);
            }
            CEvent::Resize(_, _) => {
                // Handled automatically by ratatui on the next draw
            }
            _ => {}
        }
    }

    /// Spawns a background task that asks the agent one question.
    fn spawn_agent_task(
        &self,
        question: String,
        bridge: Arc<AgentBridge>,
        tx: mpsc::Sender<AsyncMessage>,
    ) {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = bridge.ask(&question) => {
                    let _ = tx.send(AsyncMessage::AgentFinished(result)).await;
                }
                _ = cancel.cancelled() => {}
            }
        });
    }

    /// Handles a message from a background task.
    fn handle_async_message(msg: AsyncMessage, app_state: &mut App) {
        match msg {
            AsyncMessage::AgentFinished(result) => {
                app_state.finish_processing(result);
            }
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI application over the given agent bridge.
pub async fn run(bridge: AgentBridge, schema: SchemaMap, connection_info: String) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.run(Arc::new(bridge), schema, connection_info).await
}
