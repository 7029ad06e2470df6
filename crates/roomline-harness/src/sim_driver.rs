//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`roomline_core::Runtime`] orchestration code runs in both production and
//! simulation. Tests reach it through [`roomline_core::Runtime::driver_mut`].

use std::collections::VecDeque;

use roomline_core::{Driver, SessionEvent, SessionView};
use thiserror::Error;

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimDriverError {
    /// A frame was sent before [`Driver::connect`].
    #[error("frame sent while not connected")]
    NotConnected,
}

/// Simulation driver for deterministic testing.
#[derive(Debug, Default)]
pub struct SimDriver {
    pending_events: VecDeque<SessionEvent>,
    incoming_frames: VecDeque<String>,
    outgoing_frames: Vec<String>,
    connected: bool,
    renders: usize,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a local input event for processing.
    pub fn inject_event(&mut self, event: SessionEvent) {
        self.pending_events.push_back(event);
    }

    /// Inject a text frame from the broker.
    pub fn inject_frame(&mut self, frame: impl Into<String>) {
        self.incoming_frames.push_back(frame.into());
    }

    /// Take all captured outgoing frames.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing_frames)
    }

    /// Check if there are pending events or frames to process.
    pub fn has_pending(&self) -> bool {
        !self.pending_events.is_empty() || !self.incoming_frames.is_empty()
    }

    /// Number of frames rendered so far.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<SessionEvent>, Self::Error> {
        Ok(self.pending_events.pop_front())
    }

    async fn send_frame(&mut self, frame: String) -> Result<(), Self::Error> {
        if !self.connected {
            return Err(SimDriverError::NotConnected);
        }
        self.outgoing_frames.push(frame);
        Ok(())
    }

    async fn recv_frame(&mut self) -> Option<String> {
        self.incoming_frames.pop_front()
    }

    async fn connect(&mut self) -> Result<(), Self::Error> {
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn render(&mut self, _view: &SessionView) -> Result<(), Self::Error> {
        self.renders += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use roomline_core::KeyInput;

    use super::*;

    #[test]
    fn inject_event_queues_event() {
        let mut driver = SimDriver::new();
        driver.inject_event(SessionEvent::Key(KeyInput::Tab));

        assert!(driver.has_pending());
    }

    #[test]
    fn inject_frame_queues_frame() {
        let mut driver = SimDriver::new();
        driver.inject_frame(r#"{"event":"connect"}"#);

        assert!(driver.has_pending());
    }

    #[tokio::test]
    async fn send_requires_connection() {
        let mut driver = SimDriver::new();
        assert_eq!(driver.send_frame("x".into()).await, Err(SimDriverError::NotConnected));

        driver.connect().await.unwrap();
        driver.send_frame("x".into()).await.unwrap();
        assert_eq!(driver.take_outgoing(), ["x"]);
    }
}
