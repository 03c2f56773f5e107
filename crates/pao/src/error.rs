//! Unified error type for Pao.

use pao_protocol::{ChannelReadError, ChannelWriteError, ProtocolError};
use pao_session::SessionError;
use pao_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates a `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PaoError {
    /// A transport-level error (bind, accept, raw send/recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A codec error outside of a channel.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A participant could not be sent to.
    #[error(transparent)]
    ChannelWrite(#[from] ChannelWriteError),

    /// A participant could not be read from.
    #[error(transparent)]
    ChannelRead(#[from] ChannelReadError),

    /// A session token problem.
    #[error(transparent)]
    Session(#[from] SessionError),
}
