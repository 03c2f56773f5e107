//! Error types for the protocol layer.
//!
//! Two families live here. [`ProtocolError`] is about turning values into
//! bytes and back; it knows nothing about connections. The channel errors,
//! [`ChannelWriteError`] and [`ChannelReadError`], are what a
//! [`ConnectionChannel`](crate::ConnectionChannel) hands back to game code,
//! and they wrap whichever lower layer actually failed.

use pao_transport::TransportError;

/// Errors that can occur while encoding or decoding a message.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, missing required fields,
    /// wrong data types, or truncated messages.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message is well-formed but not acceptable.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// An outbound message could not be delivered.
///
/// Nothing is retried at this layer. The owner of the participant decides
/// whether to retry, drop the participant, or wait for a reconnect.
#[derive(Debug, thiserror::Error)]
pub enum ChannelWriteError {
    /// The channel was already closed.
    #[error("channel closed")]
    Closed,

    /// The value could not be encoded.
    #[error("could not encode outbound message: {0}")]
    Encode(#[source] ProtocolError),

    /// The transport refused or failed to carry the frame.
    #[error("transport write failed: {0}")]
    Transport(#[source] TransportError),
}

/// The next inbound message could not be obtained.
///
/// Network failure and protocol violation both land here. To find out
/// whether the participant is still reachable, check
/// [`ConnectionChannel::is_closed`](crate::ConnectionChannel::is_closed)
/// rather than matching on the variant.
#[derive(Debug, thiserror::Error)]
pub enum ChannelReadError {
    /// The channel is closed; no more messages will arrive.
    #[error("channel closed")]
    Closed,

    /// A message arrived but could not be decoded into the requested type.
    #[error("could not decode inbound message: {0}")]
    Decode(#[source] ProtocolError),

    /// The transport broke while waiting for a message.
    #[error("transport read failed: {0}")]
    Transport(#[source] TransportError),
}
