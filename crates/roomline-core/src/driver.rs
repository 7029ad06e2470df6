//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the session runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{SessionEvent, SessionView};

/// Abstracts I/O operations for the session runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal client and in
/// simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, WebSocket or an in-process
///   broker for transport
/// - **Simulation**: scripted events and a pure broker model
///
/// Frames are JSON text. Connection changes arrive as synthesized
/// `connect`/`disconnect` frames through [`Driver::recv_frame`], so they
/// take the same decode path as broker events.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next local input event.
    ///
    /// Returns the event or `None` if nothing is ready.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<SessionEvent>, Self::Error>> + Send;

    /// Send a text frame to the broker.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport is gone.
    fn send_frame(&mut self, frame: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receive a text frame without waiting.
    ///
    /// Returns the frame or `None` if nothing is buffered.
    fn recv_frame(&mut self) -> impl Future<Output = Option<String>> + Send;

    /// Start the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be started.
    fn connect(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Check if the transport has been started.
    fn is_connected(&self) -> bool;

    /// Render the view.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, view: &SessionView) -> Result<(), Self::Error>;

    /// Stop the transport and clean up resources.
    fn stop(&mut self);
}
