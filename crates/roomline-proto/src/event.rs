//! Event envelopes.
//!
//! Both directions use serde's adjacently tagged representation, which maps
//! one-to-one onto the `{"event", "data"}` envelope. Variants without a
//! payload (`connect`, `disconnect`) serialize without a `data` key.

use serde::{Deserialize, Serialize};

use crate::{
    ProtocolError, Result,
    payloads::{ActiveUsers, Broadcast, DirectMessage, RoomRef, SendMessage, StatusNotice},
};

/// Events sent from a client to the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    /// Subscribe to a room's broadcasts.
    Join(RoomRef),
    /// Unsubscribe from a room's broadcasts.
    Leave(RoomRef),
    /// Public or private chat message.
    Message(SendMessage),
}

impl Outbound {
    /// `join {room}`.
    pub fn join(room: impl Into<String>) -> Self {
        Self::Join(RoomRef::new(room))
    }

    /// `leave {room}`.
    pub fn leave(room: impl Into<String>) -> Self {
        Self::Leave(RoomRef::new(room))
    }

    /// Event name as it appears on the wire.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::Leave(_) => "leave",
            Self::Message(_) => "message",
        }
    }

    /// Encode as a JSON text frame.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|source| ProtocolError::Encode { event: self.name(), source })
    }

    /// Decode a JSON text frame.
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Events delivered from the broker (or synthesized by the transport) to a
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    /// Transport is ready. Synthesized locally, never sent by the broker.
    Connect,
    /// Transport dropped. Synthesized locally, never sent by the broker.
    Disconnect,
    /// Broadcast room message.
    Message(Broadcast),
    /// Message directed at this client.
    PrivateMessage(DirectMessage),
    /// System notice (joins, leaves).
    Status(StatusNotice),
    /// Full presence roster replacement.
    ActiveUsers(ActiveUsers),
}

impl Inbound {
    /// Event name as it appears on the wire.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::Message(_) => "message",
            Self::PrivateMessage(_) => "private_message",
            Self::Status(_) => "status",
            Self::ActiveUsers(_) => "active_users",
        }
    }

    /// Encode as a JSON text frame.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|source| ProtocolError::Encode { event: self.name(), source })
    }

    /// Decode a JSON text frame.
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode a frame received as raw bytes.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| ProtocolError::InvalidUtf8)?;
        Self::decode(text)
    }
}
