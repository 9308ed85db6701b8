//! Code shared by the Murmur server and client.
//!
//! - `wire`: JSON frames exchanged over the WebSocket
//! - `time`: clock abstraction and timestamp formatting
//! - `logger`: tracing subscriber setup for the binaries

pub mod logger;
pub mod time;
pub mod wire;
