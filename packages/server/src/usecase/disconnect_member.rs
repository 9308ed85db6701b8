//! UseCase: メンバー切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, Member, MessagePusher, frame};

use super::error::DisconnectError;

/// メンバー切断のユースケース
pub struct DisconnectMemberUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectMemberUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// メンバー切断を実行
    ///
    /// 接続を登録解除し、残りのメンバーに退室を通知します。
    /// 既に登録解除済みの場合は何もブロードキャストせず `Ok(None)` を返します。
    pub async fn execute(&self, id: &ConnectionId) -> Result<Option<Member>, DisconnectError> {
        let Some(member) = self.message_pusher.unregister_member(id).await else {
            return Ok(None);
        };

        let json = frame::left(&member)
            .to_json()
            .map_err(|e| DisconnectError::Encode(e.to_string()))?;

        let remaining: Vec<ConnectionId> = self
            .message_pusher
            .members()
            .await
            .into_iter()
            .map(|m| m.id)
            .collect();

        self.message_pusher
            .broadcast(remaining, &json)
            .await
            .map_err(|e| DisconnectError::BroadcastFailed(e.to_string()))?;

        Ok(Some(member))
    }
}
