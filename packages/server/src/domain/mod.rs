//! Domain layer of the relay server.
//!
//! - `member`: who is in the room (connection id + display name)
//! - `frame`: the frames broadcast to the room (chat, join, leave)
//! - `message_pusher`: the interface used to deliver frames to members

pub mod frame;
pub mod member;
pub mod message_pusher;

pub use member::{ConnectionId, DisplayName, InvalidDisplayName, Member};
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
