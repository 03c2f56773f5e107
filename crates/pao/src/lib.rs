//! # Pao
//!
//! Transport-agnostic participants with reconnectable sessions for
//! real-time multiplayer games.
//!
//! A game server deals in [`Participant`](pao_session::Participant)s:
//! players, kibitzers, and bots. Each one owns a
//! [`ConnectionChannel`](pao_protocol::ConnectionChannel) and may carry a
//! [`SessionToken`](pao_session::SessionToken) that lets it survive a
//! dropped connection. This crate re-exports the layers and adds a
//! WebSocket [`ParticipantListener`] plus logging setup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pao::prelude::*;
//!
//! # async fn run() -> Result<(), PaoError> {
//! pao::telemetry::init("info");
//!
//! let mut listener = ParticipantListener::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//!
//! loop {
//!     let channel = listener.accept().await?;
//!     // Read the join request, then either:
//!     let mut player = Participant::new(channel, "Alice", None, ParticipantFlags::player());
//!     player.assign_session_token(SessionToken::generate())?;
//!     // ...or Participant::with_session(channel, name, cred, flags, token)
//!     // for a client that came back with its token.
//!     # break;
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod listener;
pub mod telemetry;

pub use error::PaoError;
pub use listener::{ListenerConfig, ParticipantListener, ParticipantListenerBuilder};

pub use pao_protocol as protocol;
pub use pao_session as session;
pub use pao_transport as transport;

/// Everything a server needs to accept and manage participants.
pub mod prelude {
    pub use crate::{ListenerConfig, PaoError, ParticipantListener};
    pub use pao_protocol::{
        ChannelReadError, ChannelWriteError, ConnectionChannel, JsonChannel,
        MessageReader,
    };
    pub use pao_session::{
        Credential, Participant, ParticipantFlags, SessionError, SessionToken,
    };
    pub use pao_transport::{FrameKind, WebSocketConnection};
}
