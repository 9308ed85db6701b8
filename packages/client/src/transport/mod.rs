//! Transport abstraction: the connection a [`ChatClient`](crate::ChatClient)
//! emits on and subscribes to.
//!
//! - `websocket`: the real connection to a relay server
//! - `memory`: an in-process transport for embedding and tests

pub mod memory;
mod subscribers;
pub mod websocket;

use std::sync::Arc;

use murmur_shared::wire::{IncomingMessage, OutgoingMessage};

pub use memory::MemoryTransport;
pub use subscribers::Subscribers;
pub use websocket::WebSocketTransport;

/// Callback invoked for each inbound message on a subscribed event
pub type MessageHandler = Arc<dyn Fn(IncomingMessage) + Send + Sync>;

/// Emit/subscribe capability of an already-open connection.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// Fire-and-forget send on `event`. Failures are logged and swallowed.
    fn emit(&self, event: &str, message: OutgoingMessage);

    /// Register `handler` for every inbound message on `event`.
    ///
    /// Handlers run one at a time in the order the transport delivers events.
    fn subscribe(&self, event: &str, handler: MessageHandler);
}
