//! The connection channel contract.
//!
//! Game code never talks to a socket directly. It talks to a
//! [`ConnectionChannel`]: something that can send a value, wait for the
//! next value, hand over the next message as raw bytes, and close. A
//! WebSocket satisfies it, an in-memory pair satisfies it, and so does
//! any hand-written double in a test.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::{ChannelReadError, ChannelWriteError, MessageReader};

/// A bidirectional message channel to one remote party.
///
/// Every method returns a `Send` future so a channel can be driven from
/// any task on a multi-threaded runtime.
///
/// # Contract for implementors
///
/// - Messages sent with [`send_structured`](Self::send_structured) are
///   observed by the remote end in the order they were submitted.
/// - [`close`](Self::close) is idempotent and never fails the caller.
///   Any receive pending at the time of the close returns a
///   [`ChannelReadError`] promptly.
/// - Once a receive has failed because the channel closed, every later
///   receive fails too.
/// - If reads and writes may happen concurrently from different tasks,
///   the implementation handles that internally.
pub trait ConnectionChannel: Send + Sync + 'static {
    /// Encodes `value` and transmits it as one logical message.
    ///
    /// No retry is attempted.
    fn send_structured<T>(
        &self,
        value: &T,
    ) -> impl Future<Output = Result<(), ChannelWriteError>> + Send
    where
        T: Serialize + Sync + ?Sized;

    /// Waits for the next message and decodes it as a `T`.
    ///
    /// There is no timeout; wrap the call in `tokio::time::timeout` for a
    /// bounded wait, or close the channel to abandon it.
    fn receive_structured<T>(
        &self,
    ) -> impl Future<Output = Result<T, ChannelReadError>> + Send
    where
        T: DeserializeOwned + Send;

    /// Waits for the next message and returns it undecoded.
    fn next_byte_stream(
        &self,
    ) -> impl Future<Output = Result<MessageReader, ChannelReadError>> + Send;

    /// Releases the underlying transport.
    fn close(&self) -> impl Future<Output = ()> + Send;

    /// Returns `true` once the channel is closed, locally or because a
    /// read observed the remote end going away. Either way the underlying
    /// transport has been released by the time this reports `true`.
    fn is_closed(&self) -> bool;
}
