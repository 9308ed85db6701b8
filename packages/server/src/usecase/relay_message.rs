//! UseCase: メッセージ中継処理
//!
//! メンバーが送ったテキストを、送信者本人を含む全メンバーに配る。
//! 送信者へのエコーがあるので、クライアントは自分の発言も受信経由で描画する。

use std::sync::Arc;

use crate::domain::{ConnectionId, Member, MessagePusher, frame};

use super::error::RelayError;

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayMessageUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// メッセージ中継を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配信対象の接続 ID リスト
    /// * `Err(RelayError)` - 中継失敗
    pub async fn execute(
        &self,
        from: &Member,
        text: String,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let json = frame::chat(from, text)
            .to_json()
            .map_err(|e| RelayError::Encode(e.to_string()))?;

        let targets: Vec<ConnectionId> = self
            .message_pusher
            .members()
            .await
            .into_iter()
            .map(|m| m.id)
            .collect();

        self.message_pusher
            .broadcast(targets.clone(), &json)
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))?;

        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, MessagePushError, MockMessagePusher},
        infrastructure::message_pusher::WebSocketMessagePusher,
    };
    use murmur_shared::wire::{Envelope, IncomingMessage};
    use tokio::sync::mpsc;

    fn member(name: &str) -> Member {
        Member::new(ConnectionId::generate(), DisplayName::new(name).unwrap())
    }

    #[tokio::test]
    async fn test_relay_echoes_to_sender_and_others() {
        // テスト項目: メッセージが送信者を含む全メンバーに届く
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let alice = member("alice");
        let bob = member("bob");
        let (tx_alice, mut rx_alice) = mpsc::unbounded_channel();
        let (tx_bob, mut rx_bob) = mpsc::unbounded_channel();
        pusher.register_member(alice.clone(), tx_alice).await;
        pusher.register_member(bob.clone(), tx_bob).await;
        let usecase = RelayMessageUseCase::new(pusher);

        // when (操作):
        let targets = usecase.execute(&alice, "hello".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(targets, vec![alice.id, bob.id]);
        for rx in [&mut rx_alice, &mut rx_bob] {
            let frame = rx.recv().await.unwrap();
            let envelope: Envelope<IncomingMessage> = serde_json::from_str(&frame).unwrap();
            assert_eq!(envelope.data, IncomingMessage::new("alice", "hello"));
        }
    }

    #[tokio::test]
    async fn test_relay_preserves_arrival_order() {
        // テスト項目: 連続したメッセージが送信順に届く
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let alice = member("alice");
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_member(alice.clone(), tx).await;
        let usecase = RelayMessageUseCase::new(pusher);

        // when (操作):
        for text in ["one", "two", "three"] {
            usecase.execute(&alice, text.to_string()).await.unwrap();
        }

        // then (期待する結果):
        let mut received = Vec::new();
        for _ in 0..3 {
            let frame = rx.recv().await.unwrap();
            let envelope: Envelope<IncomingMessage> = serde_json::from_str(&frame).unwrap();
            received.push(envelope.data.message);
        }
        assert_eq!(received, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_relay_maps_broadcast_failure() {
        // テスト項目: ブロードキャスト失敗が RelayError に変換される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_members().returning(Vec::new);
        pusher
            .expect_broadcast()
            .returning(|_, _| Err(MessagePushError::PushFailed("closed".to_string())));
        let usecase = RelayMessageUseCase::new(Arc::new(pusher));

        // when (操作):
        let result = usecase.execute(&member("alice"), "hi".to_string()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RelayError::BroadcastFailed(_))));
    }
}
