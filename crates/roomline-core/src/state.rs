//! Observable session state types.
//!
//! This module defines the data structures that describe the client's view of
//! the chat: who we are ([`Identity`]), what a transcript entry looks like
//! ([`Message`]) and where the transport stands ([`ConnectionState`]).

use std::fmt;

/// Sender label used for broker status notices.
pub const SYSTEM_SENDER: &str = "System";

/// Name of the local user.
///
/// Supplied once when the session is created and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Wrap an externally assigned identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` refers to this identity. Exact, case-sensitive match.
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected to the broker.
    #[default]
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Transport reported ready.
    Connected,
}

/// Display category of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Broadcast authored by the local identity.
    Own,
    /// Broadcast authored by someone else.
    Other,
    /// Broker notice.
    System,
    /// Directed message, in either direction.
    Private,
}

/// A transcript entry.
///
/// Immutable once constructed; logs only ever append them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Identity or label shown as the author.
    pub sender: String,
    /// Message text.
    pub body: String,
    /// Display category.
    pub classification: Classification,
    /// Broker timestamp. `None` for local echoes.
    pub timestamp: Option<String>,
}

impl Message {
    /// Create a message without a timestamp.
    pub fn new(
        sender: impl Into<String>,
        body: impl Into<String>,
        classification: Classification,
    ) -> Self {
        Self { sender: sender.into(), body: body.into(), classification, timestamp: None }
    }

    /// Attach the broker timestamp, if any.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Optimistic echo of a private message we just sent to `target`.
    pub fn private_echo(target: &str, body: impl Into<String>) -> Self {
        Self::new(format!("To {target}"), body, Classification::Private)
    }

    /// Broker notice.
    pub fn system(body: impl Into<String>) -> Self {
        Self::new(SYSTEM_SENDER, body, Classification::System)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_match_is_exact() {
        let me = Identity::new("Guest0930");
        assert!(me.is("Guest0930"));
        assert!(!me.is("guest0930"));
        assert!(!me.is(""));
    }

    #[test]
    fn private_echo_labels_recipient() {
        let echo = Message::private_echo("bob", "hello");
        assert_eq!(echo, Message::new("To bob", "hello", Classification::Private));
        assert!(echo.timestamp.is_none());
    }
}
