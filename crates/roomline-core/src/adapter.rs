//! Transport boundary.
//!
//! The [`ConnectionAdapter`] sits between the session state machine and
//! whatever carries frames to the broker.
//!
//! # Responsibilities
//!
//! - Decodes inbound text frames into [`SessionEvent`]s. Frames that fail to
//!   decode are logged and dropped, so the session never sees them.
//! - Queues outbound events and encodes them for the driver to flush in the
//!   next I/O cycle.

use roomline_proto::{Inbound, Outbound};

use crate::SessionEvent;

/// Codec boundary and send queue between session and transport.
#[derive(Debug, Default)]
pub struct ConnectionAdapter {
    outgoing: Vec<Outbound>,
}

impl ConnectionAdapter {
    /// Create an adapter with an empty send queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an inbound text frame. `None` if the frame is not a known event.
    pub fn receive(&self, frame: &str) -> Option<SessionEvent> {
        match Inbound::decode(frame) {
            Ok(event) => {
                tracing::trace!(event = event.name(), "received");
                Some(SessionEvent::Inbound(event))
            },
            Err(error) => {
                tracing::warn!(%error, "dropping undecodable frame");
                None
            },
        }
    }

    /// Queue an outbound event. Fire-and-forget.
    pub fn send(&mut self, event: Outbound) {
        self.outgoing.push(event);
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.outgoing.len()
    }

    /// Take pending events encoded as text frames, in send order.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
            .into_iter()
            .filter_map(|event| match event.encode() {
                Ok(frame) => Some(frame),
                Err(error) => {
                    tracing::warn!(%error, "dropping unencodable event");
                    None
                },
            })
            .collect()
    }
}
