//! In-process transport.

use std::sync::{Mutex, PoisonError};

use murmur_shared::wire::{IncomingMessage, OutgoingMessage};

use super::{MessageHandler, Subscribers, Transport};

/// Transport that records what is emitted and delivers what it is told to.
///
/// With [`MemoryTransport::echoing_as`] every emitted message is delivered
/// straight back under the given name, the way the relay server echoes a
/// member's own messages.
#[derive(Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<(String, OutgoingMessage)>>,
    subscribers: Subscribers,
    echo_name: Option<String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echoing_as(name: impl Into<String>) -> Self {
        Self {
            echo_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Everything emitted so far, oldest first
    pub fn sent(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Deliver an inbound message as if it came from the server
    pub fn deliver(&self, event: &str, message: IncomingMessage) {
        self.subscribers.dispatch(event, message);
    }
}

impl Transport for MemoryTransport {
    fn emit(&self, event: &str, message: OutgoingMessage) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((event.to_string(), message.clone()));

        if let Some(name) = &self.echo_name {
            self.deliver(event, IncomingMessage::new(name.as_str(), message.data));
        }
    }

    fn subscribe(&self, event: &str, handler: MessageHandler) {
        self.subscribers.subscribe(event, handler);
    }
}
