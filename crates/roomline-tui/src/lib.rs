//! Terminal UI for Roomline
//!
//! A thin shell over [`roomline_core::Driver`] that provides terminal I/O
//! and the broker connection. All session logic lives in the generic
//! [`roomline_core::Runtime`].
//!
//! Without a broker URL the client talks to an in-process simulated broker
//! ([`server`]); with one it speaks the JSON event protocol over a
//! WebSocket ([`transport`]).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod server;
pub mod terminal;
pub mod transport;
pub mod ui;

pub use config::ConfigError;
pub use roomline_core::{Driver, Identity, KeyInput, Runtime, SessionController, SessionEvent};
pub use terminal::{Backend, TerminalDriver, TerminalError};
pub use transport::{Connection, TransportError};
