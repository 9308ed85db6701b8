//! Server state shared by the handlers.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{ConnectMemberUseCase, DisconnectMemberUseCase, RelayMessageUseCase},
};

/// Shared application state
pub struct AppState {
    pub connect_member_usecase: Arc<ConnectMemberUseCase>,
    pub disconnect_member_usecase: Arc<DisconnectMemberUseCase>,
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// Read access to the member list for diagnostics endpoints
    pub message_pusher: Arc<dyn MessagePusher>,
}

impl AppState {
    /// Wire every use case to the same MessagePusher
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            connect_member_usecase: Arc::new(ConnectMemberUseCase::new(message_pusher.clone())),
            disconnect_member_usecase: Arc::new(DisconnectMemberUseCase::new(
                message_pusher.clone(),
            )),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(message_pusher.clone())),
            message_pusher,
        }
    }
}
