//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The broker is either a
//! WebSocket server or the in-process simulated broker.

use std::{
    collections::VecDeque,
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use roomline_core::{Driver, Identity, KeyInput, SessionEvent, SessionView};
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;

use crate::{
    server,
    transport::{self, Connection, TransportError},
    ui,
};

const TICK: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,
}

/// Where frames go.
#[derive(Debug, Clone)]
pub enum Backend {
    /// In-process simulated broker serving `rooms`.
    Simulated {
        /// Username registered with the broker.
        identity: Identity,
        /// Rooms the broker accepts.
        rooms: Vec<String>,
    },
    /// Remote broker at a `ws://` URL, built by [`transport::broker_url`].
    WebSocket(String),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the broker
/// connection. Frames that arrive while waiting for input are buffered and
/// handed out by [`Driver::recv_frame`].
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    connection: Option<Connection>,
    backend: Backend,
    inbox: VecDeque<String>,
    roster_focused: bool,
}

impl TerminalDriver {
    /// Create a new terminal driver. Enters raw mode and the alternate
    /// screen; both are restored on drop.
    pub fn new(backend: Backend) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            connection: None,
            backend,
            inbox: VecDeque::new(),
            roster_focused: false,
        })
    }

    /// Convert a crossterm key event to a [`KeyInput`].
    ///
    /// Enter with Shift, Alt or Ctrl inserts a newline. Plain Enter while the
    /// roster has the selection mentions the selected member. Ctrl+C quits.
    fn convert_key(key: KeyEvent, roster_focused: bool) -> Option<KeyInput> {
        let modified = key.modifiers.intersects(
            KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL,
        );

        match key.code {
            KeyCode::Enter if modified => Some(KeyInput::ModifiedEnter),
            KeyCode::Enter if roster_focused => Some(KeyInput::Mention),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyInput::Esc)
            },
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::BackTab => Some(KeyInput::BackTab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }
}

/// Wait for the next broker frame, or forever when not connected.
async fn next_frame(connection: Option<&mut Connection>) -> Option<String> {
    match connection {
        Some(conn) => conn.from_server.recv().await,
        None => std::future::pending().await,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<SessionEvent>, Self::Error> {
        let roster_focused = self.roster_focused;

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key, roster_focused).map(SessionEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(SessionEvent::Resize(cols, rows))),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Broker frames wake the loop; the runtime drains them next
            Some(frame) = next_frame(self.connection.as_mut()) => {
                self.inbox.push_back(frame);
                Ok(None)
            }

            () = tokio::time::sleep(TICK) => Ok(Some(SessionEvent::Tick)),
        }
    }

    async fn send_frame(&mut self, frame: String) -> Result<(), Self::Error> {
        let Some(conn) = &self.connection else {
            return Ok(());
        };
        // The UI loop must not wait on an unreachable broker.
        match conn.to_server.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("broker channel full, dropping frame");
                Ok(())
            },
            Err(TrySendError::Closed(_)) => Err(TerminalError::ChannelSend),
        }
    }

    async fn recv_frame(&mut self) -> Option<String> {
        if let Some(frame) = self.inbox.pop_front() {
            return Some(frame);
        }
        self.connection.as_mut().and_then(|conn| conn.from_server.try_recv().ok())
    }

    async fn connect(&mut self) -> Result<(), Self::Error> {
        let connection = match &self.backend {
            Backend::Simulated { identity, rooms } => {
                tracing::info!("starting simulated broker");
                server::spawn_server(identity.as_str(), rooms.clone())
            },
            Backend::WebSocket(url) => {
                tracing::info!(%url, "connecting to broker");
                transport::connect(url)?
            },
        };
        self.connection = Some(connection);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn render(&mut self, view: &SessionView) -> Result<(), Self::Error> {
        self.roster_focused = !view.composer_focused();
        self.terminal.draw(|frame| ui::render(frame, view))?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(ref conn) = self.connection {
            conn.stop();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
