//! WebSocket transport to a Murmur relay server.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use murmur_shared::wire::{Envelope, IncomingMessage, OutgoingMessage};

use crate::error::ClientError;

use super::{MessageHandler, Subscribers, Transport};

enum Outbound {
    Frame(String),
    Close,
}

/// Connected WebSocket transport.
///
/// A writer task drains emitted frames into the socket and a reader task
/// dispatches inbound `"message"` frames to subscribers. Dropping the
/// transport stops both tasks.
pub struct WebSocketTransport {
    outbound: mpsc::UnboundedSender<Outbound>,
    subscribers: Arc<Subscribers>,
    closed: watch::Receiver<bool>,
    read_task: JoinHandle<()>,
    write_task: JoinHandle<()>,
}

impl WebSocketTransport {
    /// Connect to `url` as `name`.
    ///
    /// `name` is sent as the `name` query parameter.
    pub async fn connect(url: &str, name: &str) -> Result<Self, ClientError> {
        let url = connect_url(url, name);

        let (ws_stream, _response) = connect_async(url.as_str()).await.map_err(|e| match e {
            WsError::Http(response) => ClientError::Rejected(response.status().as_u16()),
            WsError::Url(e) => ClientError::InvalidUrl(format!("{}: {}", url, e)),
            e => ClientError::Connection(e.to_string()),
        })?;
        tracing::info!("Connected to {}", url);

        let (mut write, mut read) = ws_stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Outbound>();
        let (closed_tx, closed) = watch::channel(false);
        let subscribers = Arc::new(Subscribers::new());

        let write_task = tokio::spawn(async move {
            while let Some(outbound) = outbound_rx.recv().await {
                let message = match outbound {
                    Outbound::Frame(json) => Message::Text(json.into()),
                    Outbound::Close => Message::Close(None),
                };
                if let Err(e) = write.send(message).await {
                    tracing::warn!("Failed to send frame: {}", e);
                    break;
                }
            }
        });

        let subscribers_for_read = subscribers.clone();
        let read_task = tokio::spawn(async move {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<Envelope<IncomingMessage>>(&text) {
                            Ok(envelope) => {
                                subscribers_for_read.dispatch(&envelope.event, envelope.data)
                            }
                            Err(e) => tracing::warn!("Ignoring unparseable frame: {}", e),
                        }
                    }
                    Ok(Message::Binary(data)) => {
                        tracing::debug!("Ignoring {} bytes of binary data", data.len());
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            closed_tx.send_replace(true);
        });

        Ok(Self {
            outbound,
            subscribers,
            closed,
            read_task,
            write_task,
        })
    }

    /// Resolves once the server side of the connection is gone
    pub async fn closed(&self) {
        let mut closed = self.closed.clone();
        // An Err means the reader task is gone, which is closed as well.
        let _ = closed.wait_for(|closed| *closed).await;
    }

    /// Ask the server to close the connection
    pub fn close(&self) {
        if self.outbound.send(Outbound::Close).is_err() {
            tracing::debug!("Connection already closed");
        }
    }
}

impl Transport for WebSocketTransport {
    fn emit(&self, event: &str, message: OutgoingMessage) {
        let json = match Envelope::new(event, message).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize message: {}", e);
                return;
            }
        };

        if self.outbound.send(Outbound::Frame(json)).is_err() {
            tracing::warn!("Connection is closed, message dropped");
        }
    }

    fn subscribe(&self, event: &str, handler: MessageHandler) {
        self.subscribers.subscribe(event, handler);
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.read_task.abort();
        self.write_task.abort();
    }
}

/// Append `name` to `url` as a percent-encoded query parameter.
fn connect_url(url: &str, name: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}name={}", url, separator, encode_query_value(name))
}

fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_url_appends_name() {
        // テスト項目: URL に name クエリパラメータが付与される
        // given (前提条件):
        let url = "ws://127.0.0.1:8080/ws";

        // when (操作):
        let result = connect_url(url, "Alice");

        // then (期待する結果):
        assert_eq!(result, "ws://127.0.0.1:8080/ws?name=Alice");
    }

    #[test]
    fn test_connect_url_extends_existing_query() {
        // テスト項目: 既存のクエリがある場合は & で連結される
        // given (前提条件):
        let url = "ws://127.0.0.1:8080/ws?room=lobby";

        // when (操作):
        let result = connect_url(url, "Bob");

        // then (期待する結果):
        assert_eq!(result, "ws://127.0.0.1:8080/ws?room=lobby&name=Bob");
    }

    #[test]
    fn test_encode_query_value_escapes_reserved_and_non_ascii() {
        // テスト項目: 予約文字と非 ASCII 文字がパーセントエンコードされる
        // given (前提条件):
        let value = "a b&c=ä";

        // when (操作):
        let result = encode_query_value(value);

        // then (期待する結果):
        assert_eq!(result, "a%20b%26c%3D%C3%A4");
    }

    #[tokio::test]
    async fn test_connect_to_closed_port_fails() {
        // テスト項目: 接続できない場合は ConnectionError が返る
        // given (前提条件):
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        // when (操作):
        let result = WebSocketTransport::connect(&format!("ws://127.0.0.1:{}/ws", port), "a").await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::Connection(_))));
    }

    #[tokio::test]
    async fn test_connect_with_bad_scheme_fails() {
        // テスト項目: ws/wss 以外のスキームは InvalidUrl になる
        // given (前提条件):
        let url = "ftp://127.0.0.1/ws";

        // when (操作):
        let result = WebSocketTransport::connect(url, "a").await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
