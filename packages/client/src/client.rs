//! The chat client: one send action and one receive handler.

use std::sync::Arc;

use murmur_shared::{
    time::Clock,
    wire::{IncomingMessage, MESSAGE_EVENT, OutgoingMessage},
};

use crate::{
    render::MessageEntry,
    transport::Transport,
    view::{InputField, MessageList},
};

/// Sends what is typed into the input field and renders what arrives.
///
/// All collaborators are passed in: the connected transport, the input
/// field, the message list and the clock used to stamp rendered entries.
/// Construction registers the client's single `"message"` handler.
pub struct ChatClient {
    transport: Arc<dyn Transport>,
    input: Arc<dyn InputField>,
    messages: Arc<dyn MessageList>,
    clock: Arc<dyn Clock>,
}

impl ChatClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        input: Arc<dyn InputField>,
        messages: Arc<dyn MessageList>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let handler_messages = messages.clone();
        let handler_clock = clock.clone();
        transport.subscribe(
            MESSAGE_EVENT,
            Arc::new(move |incoming: IncomingMessage| {
                append_entry(handler_messages.as_ref(), handler_clock.as_ref(), incoming)
            }),
        );

        Self {
            transport,
            input,
            messages,
            clock,
        }
    }

    /// Send the input field's value and clear the field.
    ///
    /// Does nothing when the field is exactly empty. Whitespace-only text is
    /// sent like any other text.
    pub fn send_message(&self) {
        let value = self.input.value();
        if value.is_empty() {
            return;
        }

        self.transport
            .emit(MESSAGE_EVENT, OutgoingMessage::new(value));
        self.input.set_value("");
    }

    /// Append one rendered entry for `data` to the message list
    pub fn on_message_received(&self, data: IncomingMessage) {
        append_entry(self.messages.as_ref(), self.clock.as_ref(), data);
    }
}

fn append_entry(messages: &dyn MessageList, clock: &dyn Clock, incoming: IncomingMessage) {
    // Stamped at render time; the wire carries no send time.
    let entry = MessageEntry::new(incoming, clock.now_millis());
    tracing::debug!("Rendering message from '{}'", entry.name);
    messages.append(entry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        transport::{MemoryTransport, MockTransport},
        view::{HtmlMessageList, MemoryMessageList, TextField},
    };
    use murmur_shared::time::FixedClock;

    const NOW: i64 = 1672531200000;

    struct Fixture {
        transport: Arc<MemoryTransport>,
        input: Arc<TextField>,
        messages: Arc<MemoryMessageList>,
        client: ChatClient,
    }

    fn fixture(transport: MemoryTransport) -> Fixture {
        let transport = Arc::new(transport);
        let input = Arc::new(TextField::new());
        let messages = Arc::new(MemoryMessageList::new());
        let client = ChatClient::new(
            transport.clone(),
            input.clone(),
            messages.clone(),
            Arc::new(FixedClock::new(NOW)),
        );
        Fixture {
            transport,
            input,
            messages,
            client,
        }
    }

    fn mock_transport() -> MockTransport {
        let mut transport = MockTransport::new();
        transport
            .expect_subscribe()
            .withf(|event, _| event == MESSAGE_EVENT)
            .times(1)
            .return_const(());
        transport
    }

    #[test]
    fn test_new_subscribes_once_to_message_event() {
        // テスト項目: 生成時に message イベントへ一度だけ購読する
        // given (前提条件):
        let transport = mock_transport();

        // when (操作):
        let _client = ChatClient::new(
            Arc::new(transport),
            Arc::new(TextField::new()),
            Arc::new(MemoryMessageList::new()),
            Arc::new(FixedClock::new(NOW)),
        );

        // then (期待する結果): MockTransport の times(1) が drop 時に検証される
    }

    #[test]
    fn test_send_with_empty_field_is_noop() {
        // テスト項目: 入力欄が空の場合は送信せず、入力欄も変更しない
        // given (前提条件):
        let mut transport = mock_transport();
        transport.expect_emit().times(0);
        let input = Arc::new(TextField::new());
        let client = ChatClient::new(
            Arc::new(transport),
            input.clone(),
            Arc::new(MemoryMessageList::new()),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        client.send_message();

        // then (期待する結果):
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_send_emits_once_and_clears_field() {
        // テスト項目: 入力値が一度だけ送信され、入力欄が空になる
        // given (前提条件):
        let mut transport = mock_transport();
        transport
            .expect_emit()
            .withf(|event, message| event == MESSAGE_EVENT && message.data == "hello")
            .times(1)
            .return_const(());
        let input = Arc::new(TextField::new());
        input.set_value("hello");
        let client = ChatClient::new(
            Arc::new(transport),
            input.clone(),
            Arc::new(MemoryMessageList::new()),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        client.send_message();

        // then (期待する結果):
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_send_single_space_is_transmitted() {
        // テスト項目: 空白 1 文字は空ではないので送信される
        // given (前提条件):
        let f = fixture(MemoryTransport::new());
        f.input.set_value(" ");

        // when (操作):
        f.client.send_message();

        // then (期待する結果):
        assert_eq!(
            f.transport.sent(),
            vec![(MESSAGE_EVENT.to_string(), OutgoingMessage::new(" "))]
        );
        assert_eq!(f.input.value(), "");
    }

    #[test]
    fn test_send_transmits_value_verbatim() {
        // テスト項目: 入力値は加工されずに送信される
        // given (前提条件):
        let f = fixture(MemoryTransport::new());
        f.input.set_value("  padded <b>text</b>  ");

        // when (操作):
        f.client.send_message();

        // then (期待する結果):
        let sent = f.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.data, "  padded <b>text</b>  ");
    }

    #[test]
    fn test_each_received_message_appends_one_entry_in_order() {
        // テスト項目: 受信 1 件につき 1 エントリが到着順に追加される
        // given (前提条件):
        let f = fixture(MemoryTransport::new());

        // when (操作):
        f.transport
            .deliver(MESSAGE_EVENT, IncomingMessage::new("Alice", "one"));
        f.transport
            .deliver(MESSAGE_EVENT, IncomingMessage::new("Bob", "two"));
        f.transport
            .deliver(MESSAGE_EVENT, IncomingMessage::new("Alice", "three"));

        // then (期待する結果):
        let messages: Vec<String> = f
            .messages
            .entries()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_other_events_are_not_rendered() {
        // テスト項目: message 以外のイベントは描画されない
        // given (前提条件):
        let f = fixture(MemoryTransport::new());

        // when (操作):
        f.transport
            .deliver("typing", IncomingMessage::new("Alice", "..."));

        // then (期待する結果):
        assert!(f.messages.is_empty());
    }

    #[test]
    fn test_on_message_received_stamps_render_time() {
        // テスト項目: エントリには描画時点の時刻が付与される
        // given (前提条件):
        let f = fixture(MemoryTransport::new());

        // when (操作):
        f.client
            .on_message_received(IncomingMessage::new("Alice", "hello"));

        // then (期待する結果):
        assert_eq!(
            f.messages.entries(),
            vec![MessageEntry {
                name: "Alice".to_string(),
                message: "hello".to_string(),
                received_at: NOW,
            }]
        );
    }

    #[test]
    fn test_round_trip_with_echo() {
        // テスト項目: "hello" を送信すると入力欄が空になり、エコーが 1 件描画される
        // given (前提条件):
        let f = fixture(MemoryTransport::echoing_as("Alice"));
        f.input.set_value("hello");

        // when (操作):
        f.client.send_message();

        // then (期待する結果):
        assert_eq!(f.input.value(), "");
        let entries = f.messages.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Alice");
        assert_eq!(entries[0].message, "hello");
    }

    #[test]
    fn test_markup_in_sender_name_is_escaped() {
        // テスト項目: 送信者名のタグはエスケープされて描画される
        // given (前提条件):
        let transport = Arc::new(MemoryTransport::new());
        let messages = Arc::new(HtmlMessageList::new());
        let client = ChatClient::new(
            transport,
            Arc::new(TextField::new()),
            messages.clone(),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        client.on_message_received(IncomingMessage::new("<b>x</b>", "hi"));

        // then (期待する結果):
        let markup = messages.markup();
        assert!(markup.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(markup.contains("hi"));
        assert!(!markup.contains("<b>"));
    }
}
