//! End-to-end tests: a real WebSocket client talks to a participant built
//! from a listener-accepted channel.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use pao::prelude::*;
use serde::{Deserialize, Serialize};
use tokio_tungstenite::tungstenite::Message;

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Chat {
    text: String,
}

async fn accept_one() -> (JsonChannel<WebSocketConnection>, ClientWs) {
    let mut listener = ParticipantListener::builder()
        .bind("127.0.0.1:0")
        .build()
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have addr");

    let server = tokio::spawn(async move { listener.accept().await });
    let (client, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("client should connect");
    let channel = server
        .await
        .expect("task should complete")
        .expect("should accept");
    (channel, client)
}

#[tokio::test]
async fn test_new_participant_exchanges_json_with_client() {
    let (channel, mut client) = accept_one().await;
    let mut player = Participant::new(
        channel,
        "Alice",
        Some(std::sync::Arc::new(Credential::new("alice"))),
        ParticipantFlags::player(),
    );
    player
        .assign_session_token(SessionToken::new("abc123").unwrap())
        .unwrap();

    // Server → client arrives as a JSON text frame.
    player
        .channel()
        .send_structured(&Chat {
            text: "your move".into(),
        })
        .await
        .expect("send should succeed");
    let msg = client.next().await.unwrap().unwrap();
    assert!(msg.is_text());
    let chat: Chat = serde_json::from_slice(&msg.into_data()).unwrap();
    assert_eq!(chat.text, "your move");

    // Client → server decodes into the requested type.
    client
        .send(Message::Text(r#"{"text":"gg"}"#.to_string().into()))
        .await
        .unwrap();
    let reply: Chat = player.channel().receive_structured().await.unwrap();
    assert_eq!(reply.text, "gg");

    // Binary frames are read raw.
    client
        .send(Message::Binary(vec![7u8, 7, 7].into()))
        .await
        .unwrap();
    let reader = player.channel().next_byte_stream().await.unwrap();
    assert_eq!(reader.kind(), FrameKind::Binary);
    assert_eq!(reader.into_bytes(), vec![7, 7, 7]);

    player.disconnect().await;

    // The client sees the close frame.
    let closing = tokio::time::timeout(Duration::from_secs(2), client.next())
        .await
        .expect("client should observe close");
    assert!(matches!(closing, Some(Ok(Message::Close(_))) | None));
}

#[tokio::test]
async fn test_client_disconnect_makes_participant_unreachable() {
    let (channel, mut client) = accept_one().await;
    let kibitzer = Participant::new(channel, "Watcher", None, ParticipantFlags::kibitzer());

    client.send(Message::Close(None)).await.unwrap();

    let err = kibitzer
        .channel()
        .receive_structured::<Chat>()
        .await
        .unwrap_err();
    assert!(matches!(err, ChannelReadError::Closed));
    assert!(kibitzer.channel().is_closed());

    // Closure is sticky.
    assert!(kibitzer.channel().receive_structured::<Chat>().await.is_err());
}

#[tokio::test]
async fn test_resumed_participant_carries_token_over_websocket() {
    let (channel, _client) = accept_one().await;
    let token = SessionToken::new("abc123").unwrap();

    let bot = Participant::with_session(
        channel,
        "Deep Banqi",
        None,
        ParticipantFlags::bot(),
        token,
    );

    assert_eq!(bot.session_token().unwrap(), "abc123");
    assert!(bot.is_automated());
    assert!(!bot.is_spectator());
    bot.disconnect().await;
}

#[tokio::test]
async fn test_bind_invalid_address_returns_transport_error() {
    let result = ParticipantListener::builder()
        .bind("not an address")
        .build()
        .await;
    assert!(matches!(result, Err(PaoError::Transport(_))));
}
