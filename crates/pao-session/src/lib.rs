//! Participants and their session identity for Pao.
//!
//! This crate answers "who is on the other end of this channel?":
//!
//! 1. **Participants** — [`Participant`] ties a display name, an optional
//!    [`Credential`], role [`ParticipantFlags`] and an owned
//!    [`ConnectionChannel`](pao_protocol::ConnectionChannel) together.
//! 2. **Session identity** — [`SessionToken`] lets a participant that lost
//!    its connection come back as the same participant.
//!
//! # How it fits in the stack
//!
//! ```text
//! Game / lobby (above)  ← decides what participants may do
//!     ↕
//! Session layer (this crate)  ← who they are, how to reach them
//!     ↕
//! Protocol layer (below)  ← ConnectionChannel, codecs
//! ```
//!
//! Storing tokens and matching a returning client to its old seat is the
//! job of whatever sits above; this crate only carries the token.

mod credential;
mod error;
mod participant;
mod token;

pub use credential::Credential;
pub use error::SessionError;
pub use participant::{Participant, ParticipantFlags};
pub use token::SessionToken;
