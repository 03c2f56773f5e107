//! Transport abstraction layer for Pao.
//!
//! Provides the [`Transport`] and [`Connection`] traits that abstract over
//! the wire used to reach a participant. A connection moves whole
//! [`Frame`]s; it knows nothing about what the bytes mean.
//!
//! Two implementations ship with the crate:
//!
//! - [`WebSocketConnection`] — the production transport
//! - [`MemoryConnection`] — an in-process pair, used as a test double and
//!   for bots running inside the server process
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

mod error;
mod memory;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
pub use memory::MemoryConnection;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique connection IDs across all transports.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocates the next process-wide unique ID.
    pub(crate) fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// Whether a frame carries UTF-8 text or arbitrary bytes.
///
/// WebSocket distinguishes the two on the wire, and browsers surface them
/// differently (`string` vs `Blob`/`ArrayBuffer`), so the distinction is
/// kept all the way up to the channel layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// UTF-8 text, e.g. a JSON document.
    Text,
    /// Opaque binary data.
    Binary,
}

/// One complete message as it travels over a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    kind: FrameKind,
    payload: Vec<u8>,
}

impl Frame {
    /// Creates a text frame.
    pub fn text(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: FrameKind::Text,
            payload: payload.into(),
        }
    }

    /// Creates a binary frame.
    pub fn binary(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: FrameKind::Binary,
            payload: payload.into(),
        }
    }

    /// Creates a frame of the given kind.
    pub fn new(kind: FrameKind, payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }

    /// Returns the frame kind.
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Returns the payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the frame, returning its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;

    /// Waits for and accepts the next incoming connection.
    fn accept(
        &mut self,
    ) -> impl Future<Output = Result<Self::Connection, TransportError>> + Send;
}

/// A single connection that can send and receive frames.
///
/// Every method returns a `Send` future so a connection can be driven
/// from any task on a multi-threaded runtime. Implementations are
/// responsible for their own internal synchronisation: `send` and `recv`
/// may be called concurrently from different tasks.
///
/// Frames sent on one connection must reach the peer in submission order.
pub trait Connection: Send + Sync + 'static {
    /// Sends one frame to the remote peer.
    fn send(
        &self,
        frame: Frame,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Receives the next frame from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is closed, either cleanly by
    /// the peer or locally via [`close`](Self::close). A pending `recv`
    /// must return promptly when `close` is called from another task.
    fn recv(
        &self,
    ) -> impl Future<Output = Result<Option<Frame>, TransportError>> + Send;

    /// Closes the connection. Calling it again is a no-op.
    fn close(&self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Returns `true` once the connection is known to be closed, either
    /// locally via [`close`](Self::close) or by the peer.
    fn is_closed(&self) -> bool;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
