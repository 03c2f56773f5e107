//! In-process transport: two connected ends backed by Tokio channels.
//!
//! Useful anywhere both sides live in the same process, most notably in
//! tests (no sockets, no ports, fully deterministic) and for bots that
//! play against humans from inside the server.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, Notify, mpsc};

use crate::{Connection, ConnectionId, Frame, TransportError};

/// One end of an in-memory connection pair.
///
/// Create both ends at once with [`MemoryConnection::pair`]. Frames sent
/// on one end arrive at the other in order. Closing either end makes the
/// peer's `recv` return `None` once it has drained the frames already in
/// flight, and makes the peer's `send` fail.
pub struct MemoryConnection {
    id: ConnectionId,
    tx: Mutex<Option<mpsc::UnboundedSender<Frame>>>,
    rx: Mutex<mpsc::UnboundedReceiver<Frame>>,
    closed: AtomicBool,
    close_notify: Notify,
}

impl MemoryConnection {
    /// Creates two connected ends.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        (Self::new(a_tx, a_rx), Self::new(b_tx, b_rx))
    }

    fn new(
        tx: mpsc::UnboundedSender<Frame>,
        rx: mpsc::UnboundedReceiver<Frame>,
    ) -> Self {
        Self {
            id: ConnectionId::next(),
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(rx),
            closed: AtomicBool::new(false),
            close_notify: Notify::new(),
        }
    }
}

impl Connection for MemoryConnection {
    async fn send(&self, frame: Frame) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::ConnectionClosed(format!(
                "{} is closed",
                self.id
            )));
        }
        match self.tx.lock().await.as_ref() {
            Some(tx) => tx.send(frame).map_err(|_| {
                TransportError::ConnectionClosed(format!(
                    "peer of {} hung up",
                    self.id
                ))
            }),
            None => Err(TransportError::ConnectionClosed(format!(
                "{} is closed",
                self.id
            ))),
        }
    }

    async fn recv(&self) -> Result<Option<Frame>, TransportError> {
        let closed = self.close_notify.notified();
        tokio::pin!(closed);
        closed.as_mut().enable();
        if self.is_closed() {
            return Ok(None);
        }

        let mut rx = self.rx.lock().await;
        tokio::select! {
            _ = &mut closed => Ok(None),
            frame = rx.recv() => {
                if frame.is_none() {
                    self.closed.store(true, Ordering::Release);
                    self.close_notify.notify_waiters();
                }
                Ok(frame)
            }
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.close_notify.notify_waiters();

        // Dropping our sender ends the peer's stream; closing our receiver
        // makes the peer's sends fail.
        self.tx.lock().await.take();
        self.rx.lock().await.close();
        tracing::debug!(conn_id = %self.id, "closed memory connection");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
