//! Codec trait and implementations for serializing/deserializing messages.
//!
//! A "codec" (coder/decoder) converts between Rust values and the payload
//! of a transport [`Frame`](pao_transport::Frame). Channels don't care HOW
//! messages are serialized; they just need something that implements
//! [`Codec`].

use pao_transport::FrameKind;
use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust values to bytes and decode bytes back.
///
/// - `Send + Sync` → one codec is shared by every task that touches a
///   channel.
/// - `'static` → the codec owns everything it needs, so channels holding
///   it can live in long-running tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented
    /// in this format.
    fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;

    /// The frame kind encoded messages should travel in.
    ///
    /// Text formats should return [`FrameKind::Text`] so browser clients
    /// receive a string rather than a blob.
    fn frame_kind(&self) -> FrameKind {
        FrameKind::Binary
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`), sent as text frames.
///
/// This is what the browser client speaks.
///
/// ```rust
/// use pao_protocol::{Codec, JsonCodec};
/// use pao_transport::FrameKind;
///
/// let codec = JsonCodec;
///
/// let bytes = codec.encode(&("flip", 12u32)).unwrap();
/// assert_eq!(bytes, br#"["flip",12]"#);
///
/// let decoded: (String, u32) = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, ("flip".to_string(), 12));
/// assert_eq!(codec.frame_kind(), FrameKind::Text);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    fn frame_kind(&self) -> FrameKind {
        FrameKind::Text
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_encode_map_key_must_be_string_returns_encode_error() {
        // JSON object keys must be strings; a tuple key can't be encoded.
        let mut map = BTreeMap::new();
        map.insert((1, 2), "piece");

        let err = JsonCodec.encode(&map).unwrap_err();
        assert!(matches!(err, ProtocolError::Encode(_)));
    }

    #[test]
    fn test_decode_truncated_json_returns_decode_error() {
        let err = JsonCodec.decode::<Vec<u32>>(b"[1, 2").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
        assert!(err.to_string().starts_with("decode failed"));
    }

    #[test]
    fn test_decode_wrong_shape_returns_decode_error() {
        let err = JsonCodec.decode::<u32>(br#"{"x":1}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
    }

    #[test]
    fn test_frame_kind_is_text() {
        assert_eq!(JsonCodec.frame_kind(), FrameKind::Text);
    }
}
