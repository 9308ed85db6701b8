//! UseCase layer: one struct per thing a connection can do to the room.

mod connect_member;
mod disconnect_member;
mod error;
mod relay_message;

pub use connect_member::ConnectMemberUseCase;
pub use disconnect_member::DisconnectMemberUseCase;
pub use error::{ConnectError, DisconnectError, RelayError};
pub use relay_message::RelayMessageUseCase;
