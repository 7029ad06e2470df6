//! Session state machine.
//!
//! [`SessionController`] owns every piece of client state (room, logs,
//! roster, composition field) and is the only thing that mutates it. It is a
//! pure state machine: it consumes [`SessionEvent`]s and produces
//! [`SessionAction`]s for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Dispatches broker events by kind to the router, cache and roster.
//! - Runs the room transition on connect, on reconnect (per
//!   [`ReconnectPolicy`]) and on user request.
//! - Turns keystrokes into composer edits, sends, room cycling and roster
//!   selection.

use roomline_proto::Inbound;

use crate::{
    Composer, ConnectionState, Identity, KeyInput, Message, MessageCache, MessageRouter, Outgoing,
    PresenceRoster, ReconnectPolicy, RoomSession, Scope, SessionAction, SessionConfig,
    SessionEvent, SessionView, ViewChange,
};

/// Top-level client session.
///
/// Constructed once with the externally supplied identity and passed by
/// reference to whatever drives it. No I/O dependencies.
#[derive(Debug, Clone)]
pub struct SessionController {
    identity: Identity,
    config: SessionConfig,
    router: MessageRouter,
    rooms: RoomSession,
    cache: MessageCache,
    roster: PresenceRoster,
    composer: Composer,
    connection: ConnectionState,
    /// Selected roster row. `None` if nothing is selected.
    roster_cursor: Option<usize>,
    /// A `connect` has been seen before; later ones are reconnects.
    has_connected: bool,
}

impl SessionController {
    /// Create a session for `identity`.
    pub fn new(identity: Identity, config: SessionConfig) -> Self {
        let rooms = RoomSession::new(config.directory());
        Self {
            router: MessageRouter::new(identity.clone()),
            identity,
            config,
            rooms,
            cache: MessageCache::new(),
            roster: PresenceRoster::new(),
            composer: Composer::new(),
            connection: ConnectionState::Disconnected,
            roster_cursor: None,
            has_connected: false,
        }
    }

    /// View model matching a freshly created session.
    pub fn initial_view(&self) -> SessionView {
        SessionView::new(&self.identity, self.rooms.directory())
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        match event {
            SessionEvent::Key(key) => self.handle_key(key),
            SessionEvent::Tick => vec![],
            SessionEvent::Resize(cols, rows) => {
                vec![SessionAction::View(ViewChange::Resized(cols, rows))]
            },
            SessionEvent::Connecting => self.set_connection(ConnectionState::Connecting),
            SessionEvent::Inbound(event) => self.handle_inbound(event),
        }
    }

    /// Submit composition text.
    ///
    /// Public text goes to the current room; `@target body` goes to `target`
    /// with a local echo. Empty or malformed text does nothing.
    pub fn send(&mut self, text: &str) -> Vec<SessionAction> {
        let room = self.effective_room();
        match self.router.classify_outgoing(text, &room) {
            Outgoing::Ignored => vec![],
            Outgoing::Public(intent) => {
                tracing::debug!(room = %room, "sending public message");
                vec![SessionAction::Transmit(intent)]
            },
            Outgoing::Private { intent, echo } => {
                tracing::debug!(room = %room, "sending private message");
                let mut actions = vec![SessionAction::Transmit(intent)];
                actions.extend(self.record(&room, echo));
                actions
            },
        }
    }

    /// Make `name` the current room. See [`RoomSession::switch_room`].
    pub fn switch_room(&mut self, name: &str) -> Vec<SessionAction> {
        self.rooms.switch_room(name, &self.cache)
    }

    /// Prefill the composer with `@identity ` and focus it. No-op for the
    /// local identity.
    pub fn compose_to(&mut self, identity: &str) -> Vec<SessionAction> {
        if self.identity.is(identity) {
            return vec![];
        }
        self.composer.set_text(format!("@{identity} "));
        vec![self.composer_changed()]
    }

    /// Dispatch a broker event by kind.
    fn handle_inbound(&mut self, event: Inbound) -> Vec<SessionAction> {
        match event {
            Inbound::Connect => self.handle_connect(),
            Inbound::Disconnect => {
                let mut actions = self.set_connection(ConnectionState::Disconnected);
                actions.push(SessionAction::View(ViewChange::StatusChanged(
                    "Disconnected from server".into(),
                )));
                actions
            },
            Inbound::ActiveUsers(snapshot) => {
                self.roster.update(snapshot.users);
                let mut actions =
                    vec![SessionAction::View(ViewChange::RosterReplaced(self.roster.entries(&self.identity)))];
                let clamped = self.roster_cursor.and_then(|i| {
                    let last = self.roster.len().checked_sub(1)?;
                    Some(i.min(last))
                });
                if clamped != self.roster_cursor {
                    self.roster_cursor = clamped;
                    actions.push(SessionAction::View(ViewChange::RosterCursor(clamped)));
                }
                actions
            },
            Inbound::Message(_) | Inbound::PrivateMessage(_) | Inbound::Status(_) => {
                let Some(classified) = self.router.classify_inbound(&event) else {
                    return vec![];
                };
                let room = match classified.scope {
                    Scope::Room(room) => room,
                    Scope::Current => self.effective_room(),
                };
                self.record(&room, classified.message)
            },
        }
    }

    fn handle_connect(&mut self) -> Vec<SessionAction> {
        let reconnect = self.has_connected;
        self.has_connected = true;
        let mut actions = self.set_connection(ConnectionState::Connected);

        if reconnect && self.config.reconnect == ReconnectPolicy::Manual {
            tracing::info!("reconnected, waiting for room selection");
            actions.push(SessionAction::View(ViewChange::StatusChanged(
                "Reconnected. Select a room to rejoin".into(),
            )));
            return actions;
        }

        if self.rooms.current().is_some() {
            tracing::info!(room = ?self.rooms.current(), "reconnected, rejoining");
            actions.extend(self.rooms.rejoin(&self.cache));
            return actions;
        }

        let room = self.effective_room();
        tracing::info!(room = %room, reconnect, "transport ready");
        actions.extend(self.switch_room(&room));
        actions
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<SessionAction> {
        match key {
            KeyInput::Char(c) => {
                self.composer.insert(c);
                vec![self.composer_changed()]
            },
            KeyInput::ModifiedEnter => {
                self.composer.insert('\n');
                vec![self.composer_changed()]
            },
            KeyInput::Enter => {
                let text = self.composer.take();
                let mut actions = vec![self.composer_changed()];
                actions.extend(self.send(&text));
                actions
            },
            KeyInput::Backspace => self.edit(Composer::backspace),
            KeyInput::Delete => self.edit(Composer::delete),
            KeyInput::Left => self.edit(Composer::left),
            KeyInput::Right => self.edit(Composer::right),
            KeyInput::Home => self.edit(Composer::home),
            KeyInput::End => self.edit(Composer::end),
            KeyInput::Tab => self
                .rooms
                .next_room()
                .map(str::to_owned)
                .map_or_else(Vec::new, |room| self.switch_room(&room)),
            KeyInput::BackTab => self
                .rooms
                .previous_room()
                .map(str::to_owned)
                .map_or_else(Vec::new, |room| self.switch_room(&room)),
            KeyInput::Up => self.move_roster_cursor(false),
            KeyInput::Down => self.move_roster_cursor(true),
            KeyInput::Mention => {
                let selected =
                    self.roster_cursor.and_then(|i| self.roster.members().get(i)).cloned();
                selected.map_or_else(Vec::new, |name| self.compose_to(&name))
            },
            KeyInput::Esc => vec![SessionAction::Quit],
        }
    }

    fn edit(&mut self, op: fn(&mut Composer)) -> Vec<SessionAction> {
        op(&mut self.composer);
        vec![self.composer_changed()]
    }

    fn move_roster_cursor(&mut self, down: bool) -> Vec<SessionAction> {
        let Some(last) = self.roster.len().checked_sub(1) else {
            return vec![];
        };
        let next = match (self.roster_cursor, down) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => i.saturating_add(1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.roster_cursor = Some(next);
        self.composer.set_focus(false);
        vec![SessionAction::View(ViewChange::RosterCursor(Some(next))), self.composer_changed()]
    }

    /// Append `message` to `room`'s log and render it if `room` is visible.
    fn record(&mut self, room: &str, message: Message) -> Vec<SessionAction> {
        let visible = self.rooms.current() == Some(room);
        let actions = if visible {
            vec![SessionAction::View(ViewChange::EntryAppended(message.clone()))]
        } else {
            tracing::trace!(room = %room, "logged for inactive room");
            vec![]
        };
        self.cache.append(room, message);
        actions
    }

    fn set_connection(&mut self, state: ConnectionState) -> Vec<SessionAction> {
        self.connection = state;
        vec![SessionAction::View(ViewChange::ConnectionChanged(state))]
    }

    fn composer_changed(&self) -> SessionAction {
        SessionAction::View(ViewChange::ComposerChanged {
            text: self.composer.text().to_owned(),
            cursor: self.composer.cursor(),
            focused: self.composer.is_focused(),
        })
    }

    /// Current room, or the default room before the first join.
    fn effective_room(&self) -> String {
        self.rooms.current().unwrap_or(self.config.default_room.as_str()).to_owned()
    }

    /// Local identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current room. `None` before the first join.
    pub fn current_room(&self) -> Option<&str> {
        self.rooms.current()
    }

    /// Selectable rooms in display order.
    pub fn directory(&self) -> &[String] {
        self.rooms.directory()
    }

    /// Per-room logs.
    pub fn cache(&self) -> &MessageCache {
        &self.cache
    }

    /// Latest presence snapshot.
    pub fn roster(&self) -> &PresenceRoster {
        &self.roster
    }

    /// Selected roster row. `None` if nothing is selected.
    pub fn roster_cursor(&self) -> Option<usize> {
        self.roster_cursor
    }

    /// Composition field.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Transport state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }
}
