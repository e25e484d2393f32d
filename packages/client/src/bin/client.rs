//! Terminal client for the multi-room chat server.
//!
//! Joins one room, prints room events and sends typed lines as chat text.
//! `/kick <name>` removes a member (admin only) and `/quit` leaves.
//! Transport failures are retried up to 5 times, 5 seconds apart.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomchat-client -- --name Alice --room lobby
//! cargo run --bin roomchat-client -- -n Bob -r lobby -u ws://127.0.0.1:3000/
//! ```

use clap::Parser;

use roomchat_client::run_client;
use roomchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomchat-client")]
#[command(about = "Terminal client for the multi-room chat server", long_about = None)]
struct Args {
    /// Member name to join with
    #[arg(short = 'n', long)]
    name: String,

    /// Room to join (created if it does not exist)
    #[arg(short = 'r', long)]
    room: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.name, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
