//! Client session core for Roomline
//!
//! Pure state machines and a generic runtime for a multi-room chat client.
//! Nothing in this crate performs I/O: transports and terminals plug in
//! through [`Driver`], so the same code runs in production and in
//! deterministic simulation.
//!
//! # Components
//!
//! - [`MessageCache`]: per-room, append-only message logs
//! - [`PresenceRoster`]: latest presence snapshot from the broker
//! - [`MessageRouter`]: outgoing text parsing and inbound classification
//! - [`RoomSession`]: current room and the leave/join/replay transition
//! - [`ConnectionAdapter`]: event codec boundary and outgoing send queue
//! - [`SessionController`]: orchestrator consuming [`SessionEvent`]s and
//!   producing [`SessionAction`]s
//! - [`SessionView`]: view model built from [`ViewChange`] records
//! - [`Driver`] / [`Runtime`]: platform I/O abstraction and event loop

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod adapter;
mod cache;
mod composer;
mod config;
mod driver;
mod event;
mod input;
mod roster;
mod room;
mod router;
mod runtime;
mod session;
mod state;
mod view;

pub use action::SessionAction;
pub use adapter::ConnectionAdapter;
pub use cache::MessageCache;
pub use composer::Composer;
pub use config::{ReconnectPolicy, SessionConfig};
pub use driver::Driver;
pub use event::SessionEvent;
pub use input::KeyInput;
pub use roster::{PresenceRoster, RosterEntry};
pub use room::RoomSession;
pub use router::{Classified, Composition, MessageRouter, Outgoing, Scope};
pub use runtime::Runtime;
pub use session::SessionController;
pub use state::{Classification, ConnectionState, Identity, Message};
pub use view::{RoomEntry, SessionView, ViewChange};
