//! The participant: one connected party in a game.
//!
//! A participant bundles WHO someone is (display name, credential), WHAT
//! they are (player, kibitzer, bot) and HOW to reach them (an exclusively
//! owned [`ConnectionChannel`]), plus the session token that lets them
//! come back after a dropped connection.
//!
//! # Two ways in
//!
//! ```text
//! fresh connection ──→ Participant::new()          token: None
//!                            │
//!                            ▼ session management
//!                      assign_session_token()      token: Some(t)
//!
//! reconnect with t ──→ Participant::with_session() token: Some(t)
//! ```
//!
//! The two constructors are deliberately separate functions rather than
//! one taking an `Option`: a reconnect path can't mint a new identity by
//! accident, and a join path can't inherit a stale token.

use std::fmt;
use std::sync::Arc;

use pao_protocol::ConnectionChannel;

use crate::{Credential, SessionError, SessionToken};

// ---------------------------------------------------------------------------
// ParticipantFlags
// ---------------------------------------------------------------------------

/// Role flags for a participant.
///
/// The two flags are independent. A spectating bot is representable;
/// whether the game allows it is the game's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParticipantFlags {
    /// Observes the game but does not act in it (a kibitzer).
    pub spectator: bool,
    /// Controlled by a program rather than a person.
    pub automated: bool,
}

impl ParticipantFlags {
    /// A human who plays.
    pub const fn player() -> Self {
        Self {
            spectator: false,
            automated: false,
        }
    }

    /// A human who watches.
    pub const fn kibitzer() -> Self {
        Self {
            spectator: true,
            automated: false,
        }
    }

    /// A program that plays.
    pub const fn bot() -> Self {
        Self {
            spectator: false,
            automated: true,
        }
    }

    /// Returns a copy with the spectator flag set to `spectator`.
    pub const fn with_spectator(mut self, spectator: bool) -> Self {
        self.spectator = spectator;
        self
    }

    /// Returns a copy with the automated flag set to `automated`.
    pub const fn with_automated(mut self, automated: bool) -> Self {
        self.automated = automated;
        self
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// One connected party: player, kibitzer, or bot.
///
/// The participant is the sole owner of its channel. End a session with
/// [`disconnect`](Self::disconnect), which closes the channel and waits
/// for it. A participant that is simply dropped while its channel is
/// still open has the close spawned onto the current Tokio runtime, so
/// the channel is released exactly once either way.
pub struct Participant<C: ConnectionChannel> {
    display_name: String,
    // Arc only so `Drop` can hand the channel to a spawned task.
    // Never cloned out of this struct.
    channel: Arc<C>,
    credential: Option<Arc<Credential>>,
    flags: ParticipantFlags,
    session_token: Option<SessionToken>,
    disconnected: bool,
}

impl<C: ConnectionChannel> Participant<C> {
    /// Creates a participant for a fresh join.
    ///
    /// The participant has no session token. Session management is
    /// expected to mint one and attach it with
    /// [`assign_session_token`](Self::assign_session_token) before the
    /// participant is considered resumable.
    ///
    /// Nothing is validated: an empty display name or a missing
    /// credential is accepted as given.
    pub fn new(
        channel: C,
        display_name: impl Into<String>,
        credential: Option<Arc<Credential>>,
        flags: ParticipantFlags,
    ) -> Self {
        let participant = Self {
            display_name: display_name.into(),
            channel: Arc::new(channel),
            credential,
            flags,
            session_token: None,
            disconnected: false,
        };
        tracing::debug!(
            name = %participant.display_name,
            spectator = flags.spectator,
            automated = flags.automated,
            "participant joined"
        );
        participant
    }

    /// Creates a participant resuming an earlier session.
    ///
    /// Used after a transport reconnect: the new channel is bound to the
    /// caller-supplied token so game and seat state keyed by that token
    /// can be re-attached. The token is not checked against any stored
    /// session here; that is the caller's job.
    pub fn with_session(
        channel: C,
        display_name: impl Into<String>,
        credential: Option<Arc<Credential>>,
        flags: ParticipantFlags,
        session_token: SessionToken,
    ) -> Self {
        let participant = Self {
            display_name: display_name.into(),
            channel: Arc::new(channel),
            credential,
            flags,
            session_token: Some(session_token),
            disconnected: false,
        };
        tracing::debug!(
            name = %participant.display_name,
            spectator = flags.spectator,
            automated = flags.automated,
            "participant resumed session"
        );
        participant
    }

    /// Human-readable name shown to other participants.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The channel used to reach this participant.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Verified identity, if the participant logged in.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_deref()
    }

    /// A shared handle to the credential, e.g. for rebuilding the
    /// participant around a new channel after a reconnect.
    pub fn shared_credential(&self) -> Option<Arc<Credential>> {
        self.credential.clone()
    }

    /// Both role flags.
    pub fn flags(&self) -> ParticipantFlags {
        self.flags
    }

    /// `true` for kibitzers.
    pub fn is_spectator(&self) -> bool {
        self.flags.spectator
    }

    /// `true` for bots.
    pub fn is_automated(&self) -> bool {
        self.flags.automated
    }

    /// The session token, if one has been assigned or supplied.
    pub fn session_token(&self) -> Option<&SessionToken> {
        self.session_token.as_ref()
    }

    /// `true` once the participant carries a session token.
    pub fn is_resumable(&self) -> bool {
        self.session_token.is_some()
    }

    /// Attaches a freshly minted token to a newly joined participant.
    ///
    /// # Errors
    /// Returns [`SessionError::TokenAlreadyAssigned`] if the participant
    /// already has a token; the existing token is kept.
    pub fn assign_session_token(
        &mut self,
        token: SessionToken,
    ) -> Result<(), SessionError> {
        if self.session_token.is_some() {
            return Err(SessionError::TokenAlreadyAssigned);
        }
        self.session_token = Some(token);
        tracing::debug!(name = %self.display_name, "session token assigned");
        Ok(())
    }

    /// Switches between playing and watching, e.g. when a kibitzer takes
    /// an empty seat.
    pub fn set_spectator(&mut self, spectator: bool) {
        self.flags.spectator = spectator;
    }

    /// Ends the session: closes the channel and consumes the participant.
    pub async fn disconnect(mut self) {
        self.channel.close().await;
        self.disconnected = true;
        tracing::debug!(name = %self.display_name, "participant disconnected");
    }
}

impl<C: ConnectionChannel> Drop for Participant<C> {
    fn drop(&mut self) {
        if self.disconnected || self.channel.is_closed() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let channel = Arc::clone(&self.channel);
                handle.spawn(async move {
                    channel.close().await;
                });
                tracing::debug!(
                    name = %self.display_name,
                    "participant dropped, closing channel"
                );
            }
            Err(_) => {
                tracing::warn!(
                    name = %self.display_name,
                    "participant dropped outside a runtime, channel left open"
                );
            }
        }
    }
}

impl<C: ConnectionChannel> fmt::Debug for Participant<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("display_name", &self.display_name)
            .field("credential", &self.credential)
            .field("flags", &self.flags)
            .field("session_token", &self.session_token)
            .finish_non_exhaustive()
    }
}
