//! Current room and the room-transition protocol.

use roomline_proto::Outbound;

use crate::{MessageCache, SessionAction, ViewChange};

/// Owns which room is current and performs the leave/join/replay transition.
///
/// `current` is `None` until the first switch and never again afterwards.
#[derive(Debug, Clone)]
pub struct RoomSession {
    current: Option<String>,
    directory: Vec<String>,
}

impl RoomSession {
    /// Create a session over the selectable `directory`, with no current
    /// room.
    pub fn new(directory: Vec<String>) -> Self {
        Self { current: None, directory }
    }

    /// Current room. `None` before the first switch.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Selectable rooms in display order.
    pub fn directory(&self) -> &[String] {
        &self.directory
    }

    /// Switch to `target`.
    ///
    /// Emits, in order: `leave(current)` if a room is current, `join(target)`,
    /// a transcript clear, one append per cached entry of `target`, and the
    /// selector highlight. Re-selecting the current room runs the full
    /// sequence. The cache is read, never written.
    pub fn switch_room(&mut self, target: &str, cache: &MessageCache) -> Vec<SessionAction> {
        let mut actions = Vec::new();

        if let Some(previous) = self.current.take() {
            tracing::debug!(room = %previous, "leaving room");
            actions.push(SessionAction::Transmit(Outbound::leave(previous)));
        }

        self.current = Some(target.to_owned());
        if !self.directory.iter().any(|room| room == target) {
            self.directory.push(target.to_owned());
        }

        actions.extend(Self::enter(target, cache));
        actions
    }

    /// Join the current room again on a fresh connection.
    ///
    /// Same sequence as [`switch_room`](Self::switch_room) without the
    /// `leave`: the new connection never joined anything. Empty when no room
    /// is current.
    pub fn rejoin(&self, cache: &MessageCache) -> Vec<SessionAction> {
        self.current.as_deref().map(|room| Self::enter(room, cache)).unwrap_or_default()
    }

    fn enter(room: &str, cache: &MessageCache) -> Vec<SessionAction> {
        let history = cache.replay(room);
        let mut actions = Vec::with_capacity(history.len() + 3);

        tracing::debug!(room = %room, replayed = history.len(), "joining room");
        actions.push(SessionAction::Transmit(Outbound::join(room)));
        actions.push(SessionAction::View(ViewChange::TranscriptCleared));
        actions.extend(
            history.iter().cloned().map(|message| SessionAction::View(ViewChange::EntryAppended(message))),
        );
        actions.push(SessionAction::View(ViewChange::RoomHighlighted(room.to_owned())));
        actions
    }

    /// Room after the current one in the directory, wrapping around.
    pub fn next_room(&self) -> Option<&str> {
        self.neighbour(1)
    }

    /// Room before the current one in the directory, wrapping around.
    pub fn previous_room(&self) -> Option<&str> {
        self.neighbour(self.directory.len().saturating_sub(1))
    }

    fn neighbour(&self, step: usize) -> Option<&str> {
        let len = self.directory.len();
        if len == 0 {
            return None;
        }
        let index = self
            .current
            .as_ref()
            .and_then(|current| self.directory.iter().position(|room| room == current))
            .map_or(0, |position| (position + step) % len);
        self.directory.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Classification, Message};

    fn session() -> RoomSession {
        RoomSession::new(["General", "Random", "Tech"].map(String::from).to_vec())
    }

    fn msg(body: &str) -> Message {
        Message::new("amy", body, Classification::Other)
    }

    #[test]
    fn first_switch_has_no_leave() {
        let mut rooms = session();
        let actions = rooms.switch_room("General", &MessageCache::new());

        assert_eq!(actions, [
            SessionAction::Transmit(Outbound::join("General")),
            SessionAction::View(ViewChange::TranscriptCleared),
            SessionAction::View(ViewChange::RoomHighlighted("General".into())),
        ]);
        assert_eq!(rooms.current(), Some("General"));
    }

    #[test]
    fn switch_leaves_joins_and_replays_in_order() {
        let mut cache = MessageCache::new();
        cache.append("Tech", msg("first"));
        cache.append("Tech", msg("second"));

        let mut rooms = session();
        let _ = rooms.switch_room("General", &cache);
        let actions = rooms.switch_room("Tech", &cache);

        assert_eq!(actions, [
            SessionAction::Transmit(Outbound::leave("General")),
            SessionAction::Transmit(Outbound::join("Tech")),
            SessionAction::View(ViewChange::TranscriptCleared),
            SessionAction::View(ViewChange::EntryAppended(msg("first"))),
            SessionAction::View(ViewChange::EntryAppended(msg("second"))),
            SessionAction::View(ViewChange::RoomHighlighted("Tech".into())),
        ]);
        assert_eq!(cache.len("Tech"), 2);
    }

    #[test]
    fn reselecting_current_room_runs_full_sequence() {
        let mut rooms = session();
        let _ = rooms.switch_room("General", &MessageCache::new());
        let actions = rooms.switch_room("General", &MessageCache::new());

        assert!(matches!(actions.as_slice(), [
            SessionAction::Transmit(Outbound::Leave(_)),
            SessionAction::Transmit(Outbound::Join(_)),
            SessionAction::View(ViewChange::TranscriptCleared),
            SessionAction::View(ViewChange::RoomHighlighted(_)),
        ]));
    }

    #[test]
    fn rejoin_skips_leave_and_replays() {
        let mut cache = MessageCache::new();
        cache.append("Tech", msg("earlier"));

        let mut rooms = session();
        assert!(rooms.rejoin(&cache).is_empty());

        let _ = rooms.switch_room("Tech", &cache);
        let actions = rooms.rejoin(&cache);

        assert_eq!(actions, [
            SessionAction::Transmit(Outbound::join("Tech")),
            SessionAction::View(ViewChange::TranscriptCleared),
            SessionAction::View(ViewChange::EntryAppended(msg("earlier"))),
            SessionAction::View(ViewChange::RoomHighlighted("Tech".into())),
        ]);
        assert_eq!(rooms.current(), Some("Tech"));
    }

    #[test]
    fn cycling_wraps_both_ways() {
        let mut rooms = session();
        assert_eq!(rooms.next_room(), Some("General"));

        let _ = rooms.switch_room("Tech", &MessageCache::new());
        assert_eq!(rooms.next_room(), Some("General"));
        assert_eq!(rooms.previous_room(), Some("Random"));

        let _ = rooms.switch_room("General", &MessageCache::new());
        assert_eq!(rooms.previous_room(), Some("Tech"));
    }

    #[test]
    fn unknown_room_joins_directory() {
        let mut rooms = session();
        let _ = rooms.switch_room("Lobby", &MessageCache::new());
        assert_eq!(rooms.directory().last().map(String::as_str), Some("Lobby"));
        assert_eq!(rooms.next_room(), Some("General"));
    }
}
