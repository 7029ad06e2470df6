//! Message routing.
//!
//! Two directions, both pure:
//!
//! - Outgoing: composition text is parsed into a [`Composition`] and turned
//!   into a send intent plus, for private messages, an optimistic echo.
//! - Inbound: broker events are classified into transcript [`Message`]s and
//!   the [`Scope`] whose log they belong to.

use roomline_proto::{Inbound, Outbound, payloads::SendMessage};

use crate::{Classification, Identity, Message};

/// Parsed composition text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// Nothing but whitespace.
    Empty,
    /// Broadcast to the current room.
    Public {
        /// Trimmed text.
        body: String,
    },
    /// `@target body`.
    Private {
        /// Recipient identity.
        target: String,
        /// Body with whitespace runs collapsed to single spaces.
        body: String,
    },
    /// `@` prefix with no target or no body.
    Malformed,
}

impl Composition {
    /// Parse raw composition text.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        let Some(rest) = trimmed.strip_prefix('@') else {
            return Self::Public { body: trimmed.to_owned() };
        };

        let mut tokens = rest.split_whitespace();
        let target = tokens.next().unwrap_or_default();
        let body = tokens.collect::<Vec<_>>().join(" ");

        // `rest` may start with whitespace ("@ bob hi"), in which case the
        // first token is still taken as the target.
        if target.is_empty() || body.is_empty() {
            Self::Malformed
        } else {
            Self::Private { target: target.to_owned(), body }
        }
    }
}

/// Routing decision for outgoing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Nothing to send. Covers empty and malformed input.
    Ignored,
    /// Public message. No echo: it shows up when the broker broadcasts it
    /// back.
    Public(Outbound),
    /// Private message plus the echo to append to the current room.
    Private {
        /// Intent for the transport.
        intent: Outbound,
        /// Optimistic local echo.
        echo: Message,
    },
}

/// Which log an inbound message belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A specific room, as tagged by the broker.
    Room(String),
    /// Whatever room is current when the message arrives.
    Current,
}

/// Classified inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Log the message is appended to.
    pub scope: Scope,
    /// Transcript entry.
    pub message: Message,
}

/// Classifies traffic relative to the local identity.
#[derive(Debug, Clone)]
pub struct MessageRouter {
    identity: Identity,
}

impl MessageRouter {
    /// Create a router for `identity`.
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    /// Identity used for `own` classification.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Route composition text. Public messages are addressed to `room`.
    pub fn classify_outgoing(&self, text: &str, room: &str) -> Outgoing {
        match Composition::parse(text) {
            Composition::Empty => Outgoing::Ignored,
            Composition::Malformed => {
                tracing::debug!("dropping private message without target or body");
                Outgoing::Ignored
            },
            Composition::Public { body } => {
                Outgoing::Public(Outbound::Message(SendMessage::public(body, room)))
            },
            Composition::Private { target, body } => Outgoing::Private {
                echo: Message::private_echo(&target, body.clone()),
                intent: Outbound::Message(SendMessage::private(body, target)),
            },
        }
    }

    /// Classify a broker event. `None` for events that carry no transcript
    /// entry (connection changes, presence).
    pub fn classify_inbound(&self, event: &Inbound) -> Option<Classified> {
        match event {
            Inbound::Message(broadcast) => {
                let classification = if self.identity.is(&broadcast.username) {
                    Classification::Own
                } else {
                    Classification::Other
                };
                let scope = broadcast.room.clone().map_or(Scope::Current, Scope::Room);
                let message = Message::new(&broadcast.username, &broadcast.msg, classification)
                    .with_timestamp(broadcast.timestamp.clone());
                Some(Classified { scope, message })
            },
            Inbound::PrivateMessage(direct) => Some(Classified {
                scope: Scope::Current,
                message: Message::new(&direct.from, &direct.msg, Classification::Private)
                    .with_timestamp(direct.timestamp.clone()),
            }),
            Inbound::Status(notice) => Some(Classified {
                scope: Scope::Current,
                message: Message::system(&notice.msg).with_timestamp(notice.timestamp.clone()),
            }),
            Inbound::Connect | Inbound::Disconnect | Inbound::ActiveUsers(_) => None,
        }
    }
}
