//! Fuzz target for the session state machine
//!
//! Drive a `SessionController` with arbitrary keys, broker events and user
//! operations, folding every emitted view change into a `SessionView`.
//!
//! # Strategy
//!
//! - Keys: typing, editing, submitting, room cycling, roster navigation
//! - Broker events: structured messages for arbitrary rooms and senders
//! - Raw frames: arbitrary text through the inbound decoder
//! - Operations: direct room switches (including unknown rooms), sends,
//!   private compositions
//!
//! # Invariants
//!
//! - NEVER panic
//! - The highlighted room is the current room
//! - The visible transcript equals the current room's log
//! - The current room is always in the directory

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use roomline_core::{Identity, KeyInput, SessionAction, SessionConfig, SessionController, SessionEvent};
use roomline_proto::{
    Inbound,
    payloads::{ActiveUsers, Broadcast, DirectMessage, StatusNotice},
};

const ROOMS: [&str; 5] = ["General", "Random", "Tech", "Games", "Elsewhere"];
const NAMES: [&str; 4] = ["me", "bob", "amy", ""];

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Key(Key),
    Broadcast { sender: u8, room: Option<u8>, body: String },
    Private { sender: u8, body: String },
    Status { body: String },
    Presence { members: Vec<u8> },
    Connect,
    Disconnect,
    RawFrame(String),
    Switch(u8),
    Send(String),
    ComposeTo(u8),
}

#[derive(Debug, Clone, Arbitrary)]
enum Key {
    Char(char),
    Enter,
    ModifiedEnter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Mention,
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => Self::Char(c),
            Key::Enter => Self::Enter,
            Key::ModifiedEnter => Self::ModifiedEnter,
            Key::Backspace => Self::Backspace,
            Key::Delete => Self::Delete,
            Key::Tab => Self::Tab,
            Key::BackTab => Self::BackTab,
            Key::Left => Self::Left,
            Key::Right => Self::Right,
            Key::Up => Self::Up,
            Key::Down => Self::Down,
            Key::Home => Self::Home,
            Key::End => Self::End,
            Key::Mention => Self::Mention,
        }
    }
}

fn pick<'a>(items: &[&'a str], index: u8) -> &'a str {
    items[usize::from(index) % items.len()]
}

fuzz_target!(|steps: Vec<Step>| {
    let mut session = SessionController::new(Identity::new("me"), SessionConfig::default());
    let mut view = session.initial_view();

    for step in steps {
        let actions = match step {
            Step::Key(key) => session.handle(SessionEvent::Key(key.into())),
            Step::Broadcast { sender, room, body } => {
                session.handle(SessionEvent::Inbound(Inbound::Message(Broadcast {
                    msg: body,
                    username: pick(&NAMES, sender).to_owned(),
                    room: room.map(|r| pick(&ROOMS, r).to_owned()),
                    timestamp: None,
                })))
            }
            Step::Private { sender, body } => {
                session.handle(SessionEvent::Inbound(Inbound::PrivateMessage(DirectMessage {
                    msg: body,
                    from: pick(&NAMES, sender).to_owned(),
                    to: Some("me".to_owned()),
                    timestamp: None,
                })))
            }
            Step::Status { body } => {
                session.handle(SessionEvent::Inbound(Inbound::Status(StatusNotice {
                    msg: body,
                    kind: None,
                    timestamp: None,
                })))
            }
            Step::Presence { members } => {
                let users = members.iter().map(|&m| pick(&NAMES, m).to_owned()).collect();
                session.handle(SessionEvent::Inbound(Inbound::ActiveUsers(ActiveUsers { users })))
            }
            Step::Connect => session.handle(SessionEvent::Inbound(Inbound::Connect)),
            Step::Disconnect => session.handle(SessionEvent::Inbound(Inbound::Disconnect)),
            Step::RawFrame(frame) => match Inbound::decode(&frame) {
                Ok(event) => session.handle(SessionEvent::Inbound(event)),
                Err(_) => vec![],
            },
            Step::Switch(room) => session.switch_room(pick(&ROOMS, room)),
            Step::Send(text) => session.send(&text),
            Step::ComposeTo(name) => session.compose_to(pick(&NAMES, name)),
        };

        for action in actions {
            if let SessionAction::View(change) = action {
                view.apply(change);
            }
        }

        assert_eq!(view.active_room(), session.current_room(), "highlight diverged");
        if let Some(room) = session.current_room() {
            assert!(session.directory().iter().any(|r| r == room), "current room not listed");
            assert_eq!(view.transcript(), session.cache().replay(room), "transcript diverged");
        }
    }
});
