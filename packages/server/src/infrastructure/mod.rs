//! Infrastructure layer: concrete implementations of domain interfaces.

pub mod message_pusher;
