//! Payloads the broker sends.
//!
//! The required fields are the ones the client core reads. The optional
//! fields (`room`, `to`, `timestamp`, `type`) are what the reference broker
//! attaches on top; they are omitted when absent.

use serde::{Deserialize, Serialize};

/// Broadcast room message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    /// Message body.
    pub msg: String,
    /// Identity of the author.
    pub username: String,
    /// Room the message was broadcast to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Broker timestamp (ISO-8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Directed (private) message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    /// Message body.
    pub msg: String,
    /// Identity of the author.
    pub from: String,
    /// Identity of the recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Broker timestamp (ISO-8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// What a status notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Someone joined the room.
    Join,
    /// Someone left the room.
    Leave,
}

/// System notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    /// Human-readable notice.
    pub msg: String,
    /// Notice category.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StatusKind>,
    /// Broker timestamp (ISO-8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Full presence snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUsers {
    /// Every identity the broker currently reports as connected.
    pub users: Vec<String>,
}
