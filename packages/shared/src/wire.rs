//! JSON frames exchanged between the client and the relay server.
//!
//! Every WebSocket text frame is an [`Envelope`] carrying an event name and
//! a payload. Only the `"message"` event is in use:
//!
//! - client → server: `{"event":"message","data":{"data":"hello"}}`
//! - server → client: `{"event":"message","data":{"name":"Alice","message":"hello"}}`

use serde::{Deserialize, Serialize};

/// Event name of the chat channel
pub const MESSAGE_EVENT: &str = "message";

/// A single frame on the connection: an event name plus its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub event: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(event: impl Into<String>, data: T) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Wrap a payload for the `"message"` channel
    pub fn message(data: T) -> Self {
        Self::new(MESSAGE_EVENT, data)
    }

    pub fn is_event(&self, event: &str) -> bool {
        self.event == event
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Text typed by the local user, sent as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub data: String,
}

impl OutgoingMessage {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// Sender display name and message text, as delivered by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub name: String,
    pub message: String,
}

impl IncomingMessage {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_envelope_wire_shape() {
        // テスト項目: 送信メッセージが {event, data: {data}} の形でシリアライズされる
        // given (前提条件):
        let envelope = Envelope::message(OutgoingMessage::new("hello"));

        // when (操作):
        let json = envelope.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"event":"message","data":{"data":"hello"}}"#);
    }

    #[test]
    fn test_incoming_envelope_parses_server_frame() {
        // テスト項目: サーバーからのフレームが IncomingMessage として解釈される
        // given (前提条件):
        let frame = r#"{"event":"message","data":{"name":"Alice","message":"hello"}}"#;

        // when (操作):
        let envelope: Envelope<IncomingMessage> = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert!(envelope.is_event(MESSAGE_EVENT));
        assert_eq!(envelope.data, IncomingMessage::new("Alice", "hello"));
    }

    #[test]
    fn test_incoming_envelope_rejects_missing_fields() {
        // テスト項目: name が欠けたフレームはパースに失敗する
        // given (前提条件):
        let frame = r#"{"event":"message","data":{"message":"hello"}}"#;

        // when (操作):
        let result = serde_json::from_str::<Envelope<IncomingMessage>>(frame);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_keeps_unknown_event_name() {
        // テスト項目: message 以外のイベント名もそのまま保持される
        // given (前提条件):
        let frame = r#"{"event":"typing","data":{"data":""}}"#;

        // when (操作):
        let envelope: Envelope<OutgoingMessage> = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert!(!envelope.is_event(MESSAGE_EVENT));
        assert_eq!(envelope.event, "typing");
    }
}
