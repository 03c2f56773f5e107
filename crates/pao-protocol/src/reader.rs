//! Raw access to a single inbound message.

use std::io::{self, Cursor, Read};
use std::pin::Pin;
use std::task::{Context, Poll};

use pao_transport::{Frame, FrameKind};
use tokio::io::{AsyncRead, ReadBuf};

/// A readable byte source positioned at the start of one inbound message.
///
/// Returned by
/// [`ConnectionChannel::next_byte_stream`](crate::ConnectionChannel::next_byte_stream)
/// for payloads that should be consumed as bytes rather than decoded into
/// a value, e.g. binary frames. Reads never block: the whole message has
/// already arrived by the time the reader exists.
///
/// Implements both [`std::io::Read`] and [`tokio::io::AsyncRead`].
#[derive(Debug)]
pub struct MessageReader {
    kind: FrameKind,
    cursor: Cursor<Vec<u8>>,
}

impl MessageReader {
    /// Wraps a received frame.
    pub fn new(frame: Frame) -> Self {
        let kind = frame.kind();
        Self {
            kind,
            cursor: Cursor::new(frame.into_payload()),
        }
    }

    /// Whether the message arrived as text or binary.
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Number of bytes not yet read.
    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    /// Returns the whole message, regardless of how much was read.
    pub fn into_bytes(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

impl Read for MessageReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl AsyncRead for MessageReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().cursor).poll_read(cx, buf)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;

    // `Read` and `AsyncReadExt` both provide `read*` methods, so calls
    // below are spelled out with the trait name.

    #[test]
    fn test_read_consumes_payload_in_chunks() {
        let mut reader = MessageReader::new(Frame::binary(vec![1u8, 2, 3, 4, 5]));
        let mut buf = [0u8; 2];

        assert_eq!(Read::read(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(buf, [1, 2]);
        assert_eq!(reader.remaining(), 3);
    }

    #[tokio::test]
    async fn test_async_read_to_end_returns_all_bytes() {
        let mut reader = MessageReader::new(Frame::text("general"));
        let mut out = Vec::new();

        AsyncReadExt::read_to_end(&mut reader, &mut out)
            .await
            .unwrap();

        assert_eq!(out, b"general");
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.kind(), FrameKind::Text);
    }

    #[test]
    fn test_into_bytes_ignores_read_position() {
        let mut reader = MessageReader::new(Frame::binary(vec![9u8, 8, 7]));
        let mut buf = [0u8; 1];
        Read::read_exact(&mut reader, &mut buf).unwrap();

        assert_eq!(reader.into_bytes(), vec![9, 8, 7]);
    }
}
