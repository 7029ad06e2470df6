//! Pure model of the chat broker.
//!
//! `SimBroker` reproduces the server side of the event contract without any
//! I/O: callers feed it connections, disconnections and client events, and
//! it returns the [`Delivery`]s the real server would push.
//!
//! Behaviour mirrors the production server:
//! - every connect and disconnect pushes the full presence list to everyone
//! - `join` is honoured only for whitelisted rooms and announced to the room,
//!   joiner included
//! - `leave` is announced to the room after the leaver is removed
//! - public messages go to every member of a whitelisted room, sender
//!   included; private messages go only to the first session with the target
//!   username
//! - messages that are empty after trimming are dropped

use std::collections::{BTreeMap, BTreeSet};

use roomline_core::SessionConfig;
use roomline_proto::{
    Inbound, Outbound,
    payloads::{
        ActiveUsers, Broadcast, DirectMessage, MessageKind, SendMessage, StatusKind, StatusNotice,
    },
};

/// Broker-assigned connection identifier.
pub type SessionId = u64;

/// An event pushed to one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Receiving session.
    pub session: SessionId,
    /// Event pushed to it.
    pub event: Inbound,
}

#[derive(Debug, Clone)]
struct Member {
    username: String,
    rooms: BTreeSet<String>,
}

/// In-memory chat broker.
#[derive(Debug, Clone)]
pub struct SimBroker {
    whitelist: Vec<String>,
    members: BTreeMap<SessionId, Member>,
}

impl Default for SimBroker {
    fn default() -> Self {
        Self::new(SessionConfig::default().rooms)
    }
}

impl SimBroker {
    /// Create a broker that serves `rooms`.
    pub fn new(rooms: Vec<String>) -> Self {
        Self { whitelist: rooms, members: BTreeMap::new() }
    }

    /// Register `session` as `username`.
    ///
    /// The session receives `connect` first, then everyone receives the new
    /// presence list.
    pub fn connect(&mut self, session: SessionId, username: impl Into<String>) -> Vec<Delivery> {
        let username = username.into();
        tracing::debug!(session, username = %username, "session connected");
        self.members.insert(session, Member { username, rooms: BTreeSet::new() });

        let mut deliveries = vec![Delivery { session, event: Inbound::Connect }];
        deliveries.extend(self.presence());
        deliveries
    }

    /// Drop `session`. Its room memberships vanish silently; remaining
    /// sessions receive the new presence list.
    pub fn disconnect(&mut self, session: SessionId) -> Vec<Delivery> {
        if let Some(member) = self.members.remove(&session) {
            tracing::debug!(session, username = %member.username, "session disconnected");
        }
        self.presence()
    }

    /// Apply one client event from `session`, stamped with `timestamp`.
    pub fn handle(&mut self, session: SessionId, event: Outbound, timestamp: &str) -> Vec<Delivery> {
        let Some(username) = self.members.get(&session).map(|m| m.username.clone()) else {
            tracing::warn!(session, event = event.name(), "event from unknown session");
            return vec![];
        };

        match event {
            Outbound::Join(target) => self.join(session, &username, target.room, timestamp),
            Outbound::Leave(target) => self.leave(session, &username, target.room, timestamp),
            Outbound::Message(message) => self.message(&username, message, timestamp),
        }
    }

    fn join(
        &mut self,
        session: SessionId,
        username: &str,
        room: String,
        timestamp: &str,
    ) -> Vec<Delivery> {
        if !self.whitelist.contains(&room) {
            tracing::warn!(room = %room, "join for unknown room");
            return vec![];
        }
        if let Some(member) = self.members.get_mut(&session) {
            member.rooms.insert(room.clone());
        }
        let notice = status(format!("{username} has joined the room"), StatusKind::Join, timestamp);
        self.to_room(&room, &notice)
    }

    fn leave(
        &mut self,
        session: SessionId,
        username: &str,
        room: String,
        timestamp: &str,
    ) -> Vec<Delivery> {
        if let Some(member) = self.members.get_mut(&session) {
            member.rooms.remove(&room);
        }
        let notice = status(format!("{username} has left the room"), StatusKind::Leave, timestamp);
        self.to_room(&room, &notice)
    }

    fn message(&self, username: &str, message: SendMessage, timestamp: &str) -> Vec<Delivery> {
        let body = message.msg.trim();
        if body.is_empty() {
            return vec![];
        }

        match message.kind {
            MessageKind::Private => {
                let Some(target) = message.target else {
                    return vec![];
                };
                let recipient = self.members.iter().find(|(_, m)| m.username == target);
                recipient.map_or_else(Vec::new, |(&session, _)| {
                    vec![Delivery {
                        session,
                        event: Inbound::PrivateMessage(DirectMessage {
                            msg: body.to_owned(),
                            from: username.to_owned(),
                            to: Some(target.clone()),
                            timestamp: Some(timestamp.to_owned()),
                        }),
                    }]
                })
            },
            MessageKind::Message => {
                let room = message.room.unwrap_or_else(|| "General".to_owned());
                if !self.whitelist.contains(&room) {
                    return vec![];
                }
                let event = Inbound::Message(Broadcast {
                    msg: body.to_owned(),
                    username: username.to_owned(),
                    room: Some(room.clone()),
                    timestamp: Some(timestamp.to_owned()),
                });
                self.to_room(&room, &event)
            },
        }
    }

    fn to_room(&self, room: &str, event: &Inbound) -> Vec<Delivery> {
        self.members
            .iter()
            .filter(|(_, member)| member.rooms.contains(room))
            .map(|(&session, _)| Delivery { session, event: event.clone() })
            .collect()
    }

    fn presence(&self) -> Vec<Delivery> {
        let users: Vec<String> = self.members.values().map(|m| m.username.clone()).collect();
        self.members
            .keys()
            .map(|&session| Delivery {
                session,
                event: Inbound::ActiveUsers(ActiveUsers { users: users.clone() }),
            })
            .collect()
    }

    /// Usernames of connected sessions, in connection-id order.
    pub fn usernames(&self) -> Vec<&str> {
        self.members.values().map(|m| m.username.as_str()).collect()
    }

    /// Sessions subscribed to `room`.
    pub fn members_of(&self, room: &str) -> Vec<SessionId> {
        self.members.iter().filter(|(_, m)| m.rooms.contains(room)).map(|(&id, _)| id).collect()
    }
}

fn status(msg: String, kind: StatusKind, timestamp: &str) -> Inbound {
    Inbound::Status(StatusNotice { msg, kind: Some(kind), timestamp: Some(timestamp.to_owned()) })
}
