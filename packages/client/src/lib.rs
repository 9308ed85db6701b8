//! Chat client for Murmur.
//!
//! [`ChatClient`] reads a text field, emits its value on the `"message"`
//! channel, and renders every message that arrives on that channel into a
//! message list. The transport, the field, the list and the clock are all
//! injected, so the same client drives the terminal UI, an HTML view or a
//! test harness.

pub mod client;
pub mod error;
pub mod render;
pub mod runner;
pub mod transport;
pub mod ui;
pub mod view;

pub use client::ChatClient;
pub use error::ClientError;
pub use runner::run_client;
