//! [`ConnectionChannel`] over any transport [`Connection`] plus a [`Codec`].

use std::sync::atomic::{AtomicBool, Ordering};

use pao_transport::{Connection, ConnectionId, Frame};
use serde::{Serialize, de::DeserializeOwned};

#[cfg(feature = "json")]
use crate::JsonCodec;
use crate::{
    ChannelReadError, ChannelWriteError, Codec, ConnectionChannel,
    MessageReader,
};

/// A channel speaking JSON, the format the browser client uses.
#[cfg(feature = "json")]
pub type JsonChannel<Conn> = CodecChannel<Conn, JsonCodec>;

/// Joins a frame [`Connection`] with a [`Codec`] to satisfy the
/// [`ConnectionChannel`] contract.
///
/// Closure is sticky: after `close`, or after a read sees the connection
/// end or break (which closes the connection too), every read fails with [`ChannelReadError::Closed`] and
/// every write with [`ChannelWriteError::Closed`]. A message that fails to
/// decode is not: it is consumed, and the next read may succeed.
pub struct CodecChannel<Conn, C> {
    conn: Conn,
    codec: C,
    terminated: AtomicBool,
}

impl<Conn: Connection, C: Codec> CodecChannel<Conn, C> {
    /// Wraps a live connection.
    pub fn new(conn: Conn, codec: C) -> Self {
        Self {
            conn,
            codec,
            terminated: AtomicBool::new(false),
        }
    }

    /// The identifier of the underlying connection.
    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Conn {
        &self.conn
    }

    /// The codec used for structured messages.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Marks the channel terminated and releases the connection. Safe to
    /// call more than once; the connection's own `close` is idempotent.
    async fn shut_down(&self) {
        self.terminated.store(true, Ordering::Release);
        if let Err(e) = self.conn.close().await {
            tracing::debug!(
                conn_id = %self.conn.id(),
                error = %e,
                "error while closing channel"
            );
        }
    }

    async fn next_frame(&self) -> Result<Frame, ChannelReadError> {
        if self.is_closed() {
            return Err(ChannelReadError::Closed);
        }
        match self.conn.recv().await {
            Ok(Some(frame)) => Ok(frame),
            Ok(None) => {
                self.shut_down().await;
                Err(ChannelReadError::Closed)
            }
            Err(e) => {
                tracing::debug!(
                    conn_id = %self.conn.id(),
                    error = %e,
                    "channel read failed"
                );
                self.shut_down().await;
                Err(ChannelReadError::Transport(e))
            }
        }
    }
}

#[cfg(feature = "json")]
impl<Conn: Connection> CodecChannel<Conn, JsonCodec> {
    /// Wraps a live connection with the JSON codec.
    pub fn json(conn: Conn) -> Self {
        Self::new(conn, JsonCodec)
    }
}

impl<Conn: Connection, C: Codec> ConnectionChannel for CodecChannel<Conn, C> {
    async fn send_structured<T>(&self, value: &T) -> Result<(), ChannelWriteError>
    where
        T: Serialize + Sync + ?Sized,
    {
        if self.is_closed() {
            return Err(ChannelWriteError::Closed);
        }
        let payload = self
            .codec
            .encode(value)
            .map_err(ChannelWriteError::Encode)?;
        let frame = Frame::new(self.codec.frame_kind(), payload);
        self.conn
            .send(frame)
            .await
            .map_err(ChannelWriteError::Transport)
    }

    async fn receive_structured<T>(&self) -> Result<T, ChannelReadError>
    where
        T: DeserializeOwned + Send,
    {
        let frame = self.next_frame().await?;
        self.codec.decode(frame.payload()).map_err(|e| {
            tracing::debug!(
                conn_id = %self.conn.id(),
                error = %e,
                "discarding undecodable message"
            );
            ChannelReadError::Decode(e)
        })
    }

    async fn next_byte_stream(&self) -> Result<MessageReader, ChannelReadError> {
        self.next_frame().await.map(MessageReader::new)
    }

    async fn close(&self) {
        self.shut_down().await;
    }

    fn is_closed(&self) -> bool {
        self.terminated.load(Ordering::Acquire) || self.conn.is_closed()
    }
}
