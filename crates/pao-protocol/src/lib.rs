//! Structured messaging for Pao.
//!
//! This crate turns raw transport frames into something game code can
//! use:
//!
//! - **Channel contract** ([`ConnectionChannel`]) — what a participant is
//!   addressed through: send a value, receive a value, read raw bytes,
//!   close.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how values are converted
//!   to and from frame payloads.
//! - **Adapter** ([`CodecChannel`], [`JsonChannel`]) — the contract
//!   implemented over any [`Connection`](pao_transport::Connection).
//! - **Errors** ([`ProtocolError`], [`ChannelReadError`],
//!   [`ChannelWriteError`]).
//!
//! ```text
//! Transport (frames) → Protocol (values) → Session (participants)
//! ```
//!
//! No message shapes are defined here. Those belong to the game.

mod channel;
mod codec;
mod codec_channel;
mod error;
mod reader;

pub use channel::ConnectionChannel;
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use codec_channel::CodecChannel;
#[cfg(feature = "json")]
pub use codec_channel::JsonChannel;
pub use error::{ChannelReadError, ChannelWriteError, ProtocolError};
pub use reader::MessageReader;
