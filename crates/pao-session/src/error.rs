//! Error types for the session layer.

/// Errors that can occur while handling session identity.
///
/// Building a [`Participant`](crate::Participant) never fails; these only
/// come from constructing tokens and from attaching one after the fact.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// An empty string was offered as a session token.
    ///
    /// "No token" is spelled `None`, never `""`.
    #[error("session token must not be empty")]
    EmptyToken,

    /// The participant already carries a session token.
    /// A joined participant keeps the identity it was first given.
    #[error("participant already has a session token")]
    TokenAlreadyAssigned,
}
