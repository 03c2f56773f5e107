//! WebSocket transport implementation using `tokio-tungstenite`.
//!
//! The stream is split into its sink and stream halves so that a task
//! blocked in [`recv`](Connection::recv) never holds up a concurrent
//! [`send`](Connection::send) or [`close`](Connection::close).

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, Notify};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::{Connection, ConnectionId, Frame, FrameKind, Transport, TransportError};

type WsStream = WebSocketStream<TcpStream>;

/// A WebSocket-based [`Transport`] that listens for incoming connections.
pub struct WebSocketTransport {
    listener: TcpListener,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    ///
    /// Pass port `0` to let the OS pick a free port, then read it back
    /// with [`local_addr`](Self::local_addr).
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket transport listening");
        Ok(Self { listener })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Transport for WebSocketTransport {
    type Connection = WebSocketConnection;

    async fn accept(&mut self) -> Result<Self::Connection, TransportError> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| {
                TransportError::AcceptFailed(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })?;

        let conn = WebSocketConnection::new(ws);
        tracing::debug!(conn_id = %conn.id, %addr, "accepted WebSocket connection");
        Ok(conn)
    }
}

/// A single WebSocket connection.
pub struct WebSocketConnection {
    id: ConnectionId,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
    // Set on local close, peer close, or a broken stream.
    closed: AtomicBool,
    // Set once the sink has been closed; independent of `closed` so a
    // connection the peer dropped still gets its sink shut on `close`.
    sink_closed: AtomicBool,
    close_notify: Notify,
}

impl WebSocketConnection {
    fn new(ws: WsStream) -> Self {
        let (sink, stream) = ws.split();
        Self {
            id: ConnectionId::next(),
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
            closed: AtomicBool::new(false),
            sink_closed: AtomicBool::new(false),
            close_notify: Notify::new(),
        }
    }

    fn mark_closed(&self) {
        self.closed.store(true, Ordering::Release);
        self.close_notify.notify_waiters();
    }
}

impl Connection for WebSocketConnection {
    async fn send(&self, frame: Frame) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::ConnectionClosed(format!(
                "{} is closed",
                self.id
            )));
        }

        let msg = match frame.kind() {
            FrameKind::Text => {
                let text = String::from_utf8(frame.into_payload()).map_err(|e| {
                    TransportError::SendFailed(io::Error::new(
                        io::ErrorKind::InvalidData,
                        e,
                    ))
                })?;
                Message::Text(text.into())
            }
            FrameKind::Binary => Message::Binary(frame.into_payload().into()),
        };

        self.sink.lock().await.send(msg).await.map_err(|e| {
            TransportError::SendFailed(io::Error::new(
                io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    async fn recv(&self) -> Result<Option<Frame>, TransportError> {
        // Register for the close notification before checking the flag,
        // otherwise a close landing in between would be missed.
        let closed = self.close_notify.notified();
        tokio::pin!(closed);
        closed.as_mut().enable();
        if self.is_closed() {
            return Ok(None);
        }

        let mut stream = self.stream.lock().await;
        loop {
            let msg = tokio::select! {
                _ = &mut closed => return Ok(None),
                msg = stream.next() => msg,
            };
            match msg {
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(Frame::binary(data.to_vec())));
                }
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(Frame::text(text.as_bytes().to_vec())));
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!(conn_id = %self.id, "peer closed WebSocket");
                    self.mark_closed();
                    return Ok(None);
                }
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %self.id, error = %e, "WebSocket stream broke");
                    self.mark_closed();
                    return Err(TransportError::ReceiveFailed(io::Error::new(
                        io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.mark_closed();
        if self.sink_closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        tracing::debug!(conn_id = %self.id, "closing WebSocket connection");

        self.sink.lock().await.close().await.map_err(|e| {
            TransportError::SendFailed(io::Error::new(
                io::ErrorKind::BrokenPipe,
                e,
            ))
        })
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
