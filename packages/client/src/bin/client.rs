//! Murmur terminal chat client.
//!
//! Connects to a relay server, sends each line typed at the prompt, and
//! prints every message the server relays, including your own.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin murmur-client -- --name Alice
//! cargo run --bin murmur-client -- -n Bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use murmur_client::run_client;
use murmur_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "murmur-client")]
#[command(about = "Terminal chat client for the Murmur relay server", long_about = None)]
struct Args {
    /// Display name shown next to your messages
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
