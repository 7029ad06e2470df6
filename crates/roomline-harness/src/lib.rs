//! Deterministic simulation harness for Roomline sessions.
//!
//! Everything here runs without sockets or terminals so tests are exact and
//! reproducible.
//!
//! - [`SimBroker`]: pure model of the chat server (rooms, presence, join and
//!   leave notices, broadcast and private routing).
//! - [`SimDriver`]: [`roomline_core::Driver`] backed by in-memory queues, so
//!   the production [`roomline_core::Runtime`] runs unchanged.
//! - [`SimWorld`]: several runtimes wired to one broker.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the session
//! invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_broker;
pub mod sim_driver;
pub mod world;

pub use invariants::{
    ActiveRoomHighlighted, ClientSnapshot, CurrentRoomNonEmpty, Invariant, InvariantRegistry,
    InvariantResult, LogsAppendOnly, SystemSnapshot, TranscriptMatchesLog, Violation,
};
pub use sim_broker::{Delivery, SessionId, SimBroker};
pub use sim_driver::{SimDriver, SimDriverError};
pub use world::SimWorld;
