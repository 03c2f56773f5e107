//! `ParticipantListener`: where live channels come from.
//!
//! The listener binds a WebSocket transport and turns every accepted
//! connection into a [`JsonChannel`], ready to be wrapped in a
//! [`Participant`](pao_session::Participant). Deciding whether that is a
//! fresh join or a resumption, and with which name and credential, is up
//! to the caller.

use std::net::SocketAddr;

use pao_protocol::JsonChannel;
use pao_transport::{Transport, WebSocketConnection, WebSocketTransport};

use crate::PaoError;

/// Listener settings.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Address to bind, e.g. `"0.0.0.0:8080"`. Port `0` picks a free one.
    pub bind_addr: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Builder for a [`ParticipantListener`].
///
/// # Example
///
/// ```rust,no_run
/// use pao::prelude::*;
///
/// # async fn run() -> Result<(), PaoError> {
/// let mut listener = ParticipantListener::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
///
/// let channel = listener.accept().await?;
/// let mut player = Participant::new(channel, "Alice", None, ParticipantFlags::player());
/// player.assign_session_token(SessionToken::generate())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ParticipantListenerBuilder {
    config: ListenerConfig,
}

impl ParticipantListenerBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address to bind to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ListenerConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the transport.
    pub async fn build(self) -> Result<ParticipantListener, PaoError> {
        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;
        Ok(ParticipantListener { transport })
    }
}

/// Accepts WebSocket connections and yields JSON channels.
pub struct ParticipantListener {
    transport: WebSocketTransport,
}

impl ParticipantListener {
    /// Creates a new builder.
    pub fn builder() -> ParticipantListenerBuilder {
        ParticipantListenerBuilder::new()
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Waits for the next client and completes the WebSocket handshake.
    ///
    /// A failed handshake only fails this call; the listener keeps
    /// working.
    pub async fn accept(
        &mut self,
    ) -> Result<JsonChannel<WebSocketConnection>, PaoError> {
        let conn = self.transport.accept().await.inspect_err(|e| {
            tracing::debug!(error = %e, "accept failed");
        })?;
        Ok(JsonChannel::json(conn))
    }
}
