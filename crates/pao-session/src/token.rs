//! Session tokens: the secret that lets a participant come back.
//!
//! When a participant first joins, session management mints a token and
//! hands it to the client. If the connection drops (WiFi hiccup, laptop
//! lid, page reload), the client reconnects and presents the token, and
//! the server rebuilds the participant around the new connection with
//! [`Participant::with_session`](crate::Participant::with_session) so it
//! keeps its seat.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// An opaque, non-empty session identifier.
///
/// The empty string is rejected at construction, so "no session yet" is
/// always `Option::<SessionToken>::None` and never a blank token. Beyond
/// that the format is not checked: tokens minted elsewhere are accepted
/// as-is.
///
/// Serializes as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps an existing token string.
    ///
    /// # Errors
    /// Returns [`SessionError::EmptyToken`] if `token` is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// Mints a fresh random token: 32 lowercase hex characters
    /// (128 bits of entropy).
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; 16] = rng.random();
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SessionToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SessionToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromStr for SessionToken {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}
