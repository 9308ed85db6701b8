//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - メンバーへのフレーム送信（broadcast）
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、送信にだけ使用します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Member, MessagePushError, MessagePusher, PusherChannel};

struct Registration {
    member: Member,
    sender: PusherChannel,
}

/// WebSocket を使った MessagePusher 実装
///
/// 登録は接続順に保持され、`members()` は参加順にメンバーを返します。
#[derive(Clone, Default)]
pub struct WebSocketMessagePusher {
    registrations: Arc<Mutex<Vec<Registration>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_member(&self, member: Member, sender: PusherChannel) {
        let mut registrations = self.registrations.lock().await;
        tracing::debug!("Member '{}' ({}) registered", member.name, member.id);
        registrations.push(Registration { member, sender });
    }

    async fn unregister_member(&self, id: &ConnectionId) -> Option<Member> {
        let mut registrations = self.registrations.lock().await;
        let position = registrations.iter().position(|r| &r.member.id == id)?;
        let removed = registrations.remove(position);
        tracing::debug!(
            "Member '{}' ({}) unregistered",
            removed.member.name,
            removed.member.id
        );
        Some(removed.member)
    }

    async fn members(&self) -> Vec<Member> {
        let registrations = self.registrations.lock().await;
        registrations.iter().map(|r| r.member.clone()).collect()
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let registrations = self.registrations.lock().await;

        for target in targets {
            match registrations.iter().find(|r| r.member.id == target) {
                Some(registration) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = registration.sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to member '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!("Member '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}
