//! Event contract for Roomline.
//!
//! Clients and the chat broker exchange named events over a persistent,
//! bidirectional connection. Each event travels as one JSON text frame:
//!
//! ```text
//! {"event": "<name>", "data": { ...payload fields... }}
//! ```
//!
//! # Components
//!
//! - [`Outbound`]: events a client sends (`join`, `leave`, `message`)
//! - [`Inbound`]: events a client receives (`message`, `private_message`,
//!   `status`, `active_users`) plus the transport-synthesized `connect` and
//!   `disconnect`
//! - [`payloads`]: the per-event payload structs
//!
//! Field presence is part of the contract: optional fields are omitted rather
//! than sent as `null`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod event;
pub mod payloads;

pub use error::{ProtocolError, Result};
pub use event::{Inbound, Outbound};
