//! UseCase: メンバー接続処理
//!
//! - 接続ごとに ConnectionId を払い出し、MessagePusher に登録する
//! - 入室通知を新規メンバーを含む全員にブロードキャストする

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, Member, MessagePusher, PusherChannel, frame,
};

use super::error::ConnectError;

/// メンバー接続のユースケース
pub struct ConnectMemberUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectMemberUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// メンバー接続を実行
    ///
    /// 表示名は一意である必要がないため、登録は常に成功し、
    /// 新しく採番した接続 ID を持つメンバーを返します。
    pub async fn execute(&self, name: DisplayName, sender: PusherChannel) -> Member {
        let member = Member::new(ConnectionId::generate(), name);
        self.message_pusher
            .register_member(member.clone(), sender)
            .await;
        member
    }

    /// 入室通知を全メンバー（新規メンバーを含む）にブロードキャスト
    pub async fn announce_entered(&self, member: &Member) -> Result<(), ConnectError> {
        let json = frame::entered(member)
            .to_json()
            .map_err(|e| ConnectError::Encode(e.to_string()))?;

        let targets: Vec<ConnectionId> = self
            .message_pusher
            .members()
            .await
            .into_iter()
            .map(|m| m.id)
            .collect();

        self.message_pusher
            .broadcast(targets, &json)
            .await
            .map_err(|e| ConnectError::BroadcastFailed(e.to_string()))
    }
}
