//! Per-event handler registry shared by the transport implementations.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
};

use murmur_shared::wire::IncomingMessage;

use super::MessageHandler;

/// Events kept while nobody is subscribed to them yet
const BACKLOG_CAPACITY: usize = 256;

#[derive(Default)]
struct Registry {
    handlers: HashMap<String, Vec<MessageHandler>>,
    backlog: VecDeque<(String, IncomingMessage)>,
}

/// Handler registry with in-order, one-at-a-time delivery.
///
/// Events that arrive before any handler is subscribed for them are held in a
/// bounded backlog and replayed to the first subscriber, so a client that
/// subscribes right after connecting does not miss the server's greeting.
///
/// Handlers must not call [`Subscribers::subscribe`] or
/// [`Subscribers::dispatch`] themselves.
#[derive(Default)]
pub struct Subscribers {
    registry: Mutex<Registry>,
    delivery: Mutex<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, event: &str, handler: MessageHandler) {
        let _delivery = lock(&self.delivery);

        let replay: Vec<IncomingMessage> = {
            let mut registry = lock(&self.registry);
            registry
                .handlers
                .entry(event.to_string())
                .or_default()
                .push(handler.clone());

            let (matching, rest): (VecDeque<_>, VecDeque<_>) = registry
                .backlog
                .drain(..)
                .partition(|(backlogged, _)| backlogged == event);
            registry.backlog = rest;
            matching.into_iter().map(|(_, message)| message).collect()
        };

        if !replay.is_empty() {
            tracing::debug!("Replaying {} backlogged '{}' event(s)", replay.len(), event);
        }
        for message in replay {
            handler(message);
        }
    }

    pub fn dispatch(&self, event: &str, message: IncomingMessage) {
        let _delivery = lock(&self.delivery);

        let handlers: Vec<MessageHandler> = {
            let mut registry = lock(&self.registry);
            let handlers = registry.handlers.get(event).cloned().unwrap_or_default();
            if handlers.is_empty() {
                if registry.backlog.len() == BACKLOG_CAPACITY {
                    registry.backlog.pop_front();
                    tracing::warn!("Backlog full, dropping oldest unsubscribed event");
                }
                registry.backlog.push_back((event.to_string(), message));
                return;
            }
            handlers
        };

        for handler in handlers {
            handler(message.clone());
        }
    }
}
