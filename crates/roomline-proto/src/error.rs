//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding event envelopes.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Envelope could not be serialized.
    #[error("failed to encode {event} event: {source}")]
    Encode {
        /// Event name that failed to encode.
        event: &'static str,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// Envelope could not be parsed (malformed JSON, unknown event name, or a
    /// payload missing required fields).
    #[error("failed to decode event: {0}")]
    Decode(#[from] serde_json::Error),

    /// Envelope bytes are not valid UTF-8.
    #[error("event frame is not valid UTF-8")]
    InvalidUtf8,
}
