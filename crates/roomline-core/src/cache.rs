//! Per-room message logs.

use std::collections::HashMap;

use crate::Message;

/// Append-only, per-room message logs.
///
/// Logs are created lazily on first append and grow for the lifetime of the
/// session. Entries are never reordered or removed.
#[derive(Debug, Clone, Default)]
pub struct MessageCache {
    logs: HashMap<String, Vec<Message>>,
}

impl MessageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to `room`'s log, creating the log if needed.
    pub fn append(&mut self, room: &str, message: Message) {
        if let Some(log) = self.logs.get_mut(room) {
            log.push(message);
        } else {
            self.logs.insert(room.to_owned(), vec![message]);
        }
    }

    /// Full log of `room` in append order. Empty if nothing was appended yet.
    pub fn replay(&self, room: &str) -> &[Message] {
        self.logs.get(room).map_or(&[], Vec::as_slice)
    }

    /// Number of entries in `room`'s log.
    pub fn len(&self, room: &str) -> usize {
        self.replay(room).len()
    }

    /// Whether no room has any entry.
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Names of rooms with at least one entry, in no particular order.
    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.logs.keys().map(String::as_str)
    }
}
