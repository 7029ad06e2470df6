//! View model and the change records that drive it.
//!
//! State transitions never touch a rendering surface. They emit
//! [`ViewChange`] records; [`SessionView::apply`] folds them into a plain
//! view model that a renderer reads. Replaying the same records always
//! produces the same view, which is what the simulation harness checks.

use crate::{ConnectionState, Identity, Message, RosterEntry};

/// A single change to the rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    /// Empty the visible transcript.
    TranscriptCleared,
    /// Append an entry to the visible transcript and scroll to it.
    EntryAppended(Message),
    /// Mark exactly this room active in the room selector.
    RoomHighlighted(String),
    /// Replace the roster panel.
    RosterReplaced(Vec<RosterEntry>),
    /// Move the roster selection. `None` clears it.
    RosterCursor(Option<usize>),
    /// Composition field contents.
    ComposerChanged {
        /// Field text.
        text: String,
        /// Cursor position in characters.
        cursor: usize,
        /// Whether the field has focus.
        focused: bool,
    },
    /// Transport state for the status bar.
    ConnectionChanged(ConnectionState),
    /// Transient status bar message.
    StatusChanged(String),
    /// Terminal resized (columns, rows).
    Resized(u16, u16),
}

/// A room selector row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntry {
    /// Label, identical to the room name.
    pub name: String,
    /// Row carries the active marker.
    pub active: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    identity: String,
    rooms: Vec<RoomEntry>,
    transcript: Vec<Message>,
    roster: Vec<RosterEntry>,
    roster_cursor: Option<usize>,
    composer: String,
    composer_cursor: usize,
    composer_focused: bool,
    connection: ConnectionState,
    status: Option<String>,
    size: (u16, u16),
}

impl SessionView {
    /// Empty view for `identity` with every room in `rooms` inactive.
    pub fn new(identity: &Identity, rooms: &[String]) -> Self {
        Self {
            identity: identity.to_string(),
            rooms: rooms.iter().map(|name| RoomEntry { name: name.clone(), active: false }).collect(),
            transcript: Vec::new(),
            roster: Vec::new(),
            roster_cursor: None,
            composer: String::new(),
            composer_cursor: 0,
            composer_focused: true,
            connection: ConnectionState::Disconnected,
            status: None,
            size: (80, 24),
        }
    }

    /// Fold one change into the view.
    pub fn apply(&mut self, change: ViewChange) {
        match change {
            ViewChange::TranscriptCleared => self.transcript.clear(),
            ViewChange::EntryAppended(message) => self.transcript.push(message),
            ViewChange::RoomHighlighted(target) => {
                if !self.rooms.iter().any(|room| room.name == target) {
                    self.rooms.push(RoomEntry { name: target.clone(), active: false });
                }
                for room in &mut self.rooms {
                    room.active = room.name == target;
                }
            },
            ViewChange::RosterReplaced(entries) => self.roster = entries,
            ViewChange::RosterCursor(cursor) => self.roster_cursor = cursor,
            ViewChange::ComposerChanged { text, cursor, focused } => {
                self.composer = text;
                self.composer_cursor = cursor;
                self.composer_focused = focused;
            },
            ViewChange::ConnectionChanged(state) => self.connection = state,
            ViewChange::StatusChanged(status) => self.status = Some(status),
            ViewChange::Resized(cols, rows) => self.size = (cols, rows),
        }
    }

    /// Read-only identity label.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Room selector rows in display order.
    pub fn rooms(&self) -> &[RoomEntry] {
        &self.rooms
    }

    /// Room carrying the active marker. `None` before the first join.
    pub fn active_room(&self) -> Option<&str> {
        self.rooms.iter().find(|room| room.active).map(|room| room.name.as_str())
    }

    /// Visible transcript, oldest first.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Roster rows in broker order.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Selected roster row.
    pub fn roster_cursor(&self) -> Option<usize> {
        self.roster_cursor
    }

    /// Composition field text.
    pub fn composer(&self) -> &str {
        &self.composer
    }

    /// Composition cursor in characters.
    pub fn composer_cursor(&self) -> usize {
        self.composer_cursor
    }

    /// Whether the composition field has focus.
    pub fn composer_focused(&self) -> bool {
        self.composer_focused
    }

    /// Transport state.
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// Transient status message. `None` if no message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn size(&self) -> (u16, u16) {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Classification;

    fn view() -> SessionView {
        let rooms = ["General", "Tech"].map(String::from);
        SessionView::new(&Identity::new("me"), &rooms)
    }

    #[test]
    fn highlight_marks_exactly_one() {
        let mut view = view();
        assert_eq!(view.active_room(), None);

        view.apply(ViewChange::RoomHighlighted("Tech".into()));
        view.apply(ViewChange::RoomHighlighted("General".into()));

        let active: Vec<_> = view.rooms().iter().filter(|r| r.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(view.active_room(), Some("General"));
    }

    #[test]
    fn highlight_matches_label_exactly() {
        let mut view = view();
        view.apply(ViewChange::RoomHighlighted("general".into()));
        assert_eq!(view.active_room(), Some("general"));
        assert_eq!(view.rooms().len(), 3);
    }

    #[test]
    fn clear_then_append() {
        let mut view = view();
        let entry = Message::new("bob", "hi", Classification::Other);
        view.apply(ViewChange::EntryAppended(entry.clone()));
        view.apply(ViewChange::TranscriptCleared);
        assert!(view.transcript().is_empty());
        view.apply(ViewChange::EntryAppended(entry.clone()));
        assert_eq!(view.transcript(), [entry]);
    }
}
