//! MessagePusher trait 定義
//!
//! メンバーへのフレーム配送のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::{ConnectionId, Member};

/// Per-connection channel drained by the connection's writer task
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Delivers serialized frames to connected members and tracks who is connected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// メンバーと送信チャンネルを登録
    async fn register_member(&self, member: Member, sender: PusherChannel);

    /// メンバーを登録解除し、登録されていた場合はそのメンバーを返す
    async fn unregister_member(&self, id: &ConnectionId) -> Option<Member>;

    /// 接続中の全メンバー（接続順）
    async fn members(&self) -> Vec<Member>;

    /// 複数メンバーに送信。一部の送信失敗は許容する
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
