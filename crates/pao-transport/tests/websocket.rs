//! Integration tests for the WebSocket transport.
//!
//! These tests spin up a real WebSocket server and client to verify
//! that frames actually flow over the network, that the text/binary
//! distinction survives the trip, and that closing behaves.

#[cfg(feature = "websocket")]
mod websocket {
    use std::sync::Arc;
    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use pao_transport::{
        Connection, Frame, FrameKind, Transport, WebSocketConnection,
        WebSocketTransport,
    };
    use tokio_tungstenite::tungstenite::Message;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Binds on an OS-assigned port, connects a client, and returns both
    /// ends.
    async fn connected_pair() -> (WebSocketConnection, ClientWs) {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("should have addr");

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let (client_ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .expect("client should connect");
        let server_conn = server_handle.await.expect("task should complete");
        (server_conn, client_ws)
    }

    #[tokio::test]
    async fn test_websocket_accept_and_send_receive() {
        let (server_conn, mut client_ws) = connected_pair().await;
        assert!(server_conn.id().into_inner() > 0);

        // --- Server sends text, client receives text ---
        server_conn
            .send(Frame::text("{\"move\":\"a1-a2\"}"))
            .await
            .expect("send should succeed");

        let msg = client_ws.next().await.unwrap().unwrap();
        assert!(msg.is_text());
        assert_eq!(msg.into_data().as_ref(), b"{\"move\":\"a1-a2\"}");

        // --- Client sends binary, server receives binary ---
        client_ws
            .send(Message::Binary(b"\x01\x02\x03".to_vec().into()))
            .await
            .unwrap();

        let received = server_conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received.kind(), FrameKind::Binary);
        assert_eq!(received.payload(), b"\x01\x02\x03");

        server_conn.close().await.expect("close should succeed");
        assert!(server_conn.is_closed());
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_client_close() {
        let (server_conn, mut client_ws) = connected_pair().await;

        client_ws.send(Message::Close(None)).await.unwrap();

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
        assert!(server_conn.is_closed());
    }

    #[tokio::test]
    async fn test_websocket_client_vanishing_marks_closed() {
        let (server_conn, client_ws) = connected_pair().await;

        // No close handshake: the TCP stream just ends.
        drop(client_ws);

        let result = tokio::time::timeout(Duration::from_secs(2), server_conn.recv())
            .await
            .expect("recv should return promptly");
        assert!(!matches!(result, Ok(Some(_))));
        assert!(server_conn.is_closed());

        // The sink still gets closed once; the second call is a no-op.
        let _ = server_conn.close().await;
        assert!(server_conn.close().await.is_ok());
    }

    #[tokio::test]
    async fn test_websocket_close_wakes_pending_recv() {
        let (server_conn, _client_ws) = connected_pair().await;
        let server_conn = Arc::new(server_conn);

        let reader = Arc::clone(&server_conn);
        let pending = tokio::spawn(async move { reader.recv().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        server_conn.close().await.expect("close should succeed");

        let result = tokio::time::timeout(Duration::from_secs(2), pending)
            .await
            .expect("recv should return promptly")
            .unwrap();
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_websocket_close_twice_is_ok() {
        let (server_conn, _client_ws) = connected_pair().await;

        server_conn.close().await.expect("first close");
        server_conn.close().await.expect("second close");
    }
}
