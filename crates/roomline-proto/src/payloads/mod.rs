//! Event payloads.
//!
//! Client-originated payloads live in [`client`], broker-originated ones in
//! [`server`]. All payloads tolerate unknown fields so the broker can add
//! metadata without breaking older clients.

pub mod client;
pub mod server;

pub use client::{MessageKind, RoomRef, SendMessage};
pub use server::{ActiveUsers, Broadcast, DirectMessage, StatusKind, StatusNotice};
