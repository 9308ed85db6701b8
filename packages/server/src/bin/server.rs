//! Murmur relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin murmur-server
//! cargo run --bin murmur-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use murmur_server::{infrastructure::message_pusher::WebSocketMessagePusher, ui::Server};
use murmur_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "murmur-server")]
#[command(about = "Single-room WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let server = Server::new(message_pusher);

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
