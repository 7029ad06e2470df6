//! Payloads a client sends.

use serde::{Deserialize, Serialize};

/// Room reference carried by `join` and `leave`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    /// Room name.
    pub room: String,
}

impl RoomRef {
    /// Reference a room by name.
    pub fn new(room: impl Into<String>) -> Self {
        Self { room: room.into() }
    }
}

/// Delivery mode of an outgoing chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Broadcast to every member of `room`.
    Message,
    /// Delivered only to `target`.
    Private,
}

/// Payload of an outgoing `message` event.
///
/// Exactly one of `room` (public) or `target` (private) is populated. Use
/// [`SendMessage::public`] or [`SendMessage::private`] to uphold this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    /// Message body.
    pub msg: String,
    /// Delivery mode.
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Destination room for public messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Recipient identity for private messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl SendMessage {
    /// Public message broadcast to `room`.
    pub fn public(msg: impl Into<String>, room: impl Into<String>) -> Self {
        Self { msg: msg.into(), kind: MessageKind::Message, room: Some(room.into()), target: None }
    }

    /// Private message delivered to `target`.
    pub fn private(msg: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: MessageKind::Private,
            room: None,
            target: Some(target.into()),
        }
    }
}
