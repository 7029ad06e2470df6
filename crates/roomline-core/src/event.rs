//! Session input events.
//!
//! This module defines [`SessionEvent`], the set of inputs that drive the
//! [`crate::SessionController`].
//!
//! Events originate from two sources:
//! - User interactions (keyboard, resize) and periodic ticks.
//! - Broker events decoded by the [`crate::ConnectionAdapter`].

use roomline_proto::Inbound;

use crate::KeyInput;

/// Events processed by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection attempt started.
    Connecting,

    /// Event pushed by the broker, or synthesized by the transport for
    /// connection changes.
    Inbound(Inbound),
}

impl From<Inbound> for SessionEvent {
    fn from(event: Inbound) -> Self {
        Self::Inbound(event)
    }
}

impl From<KeyInput> for SessionEvent {
    fn from(key: KeyInput) -> Self {
        Self::Key(key)
    }
}
