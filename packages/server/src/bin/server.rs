//! Multi-room WebSocket chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomchat-server
//! cargo run --bin roomchat-server -- --host 0.0.0.0 --port 3000 --max-members 50
//! ```

use clap::Parser;
use roomchat_server::{
    build_server,
    domain::policy::{
        DEFAULT_ARCHIVE_CAPACITY, DEFAULT_MAX_MEMBERS, DEFAULT_MAX_ROOM_NAME_LEN,
        DEFAULT_MIN_ROOM_NAME_LEN, RoomPolicy,
    },
};
use roomchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomchat-server")]
#[command(about = "Multi-room WebSocket chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Maximum number of members per room
    #[arg(long, default_value_t = DEFAULT_MAX_MEMBERS)]
    max_members: usize,

    /// Number of chat lines kept per room
    #[arg(long, default_value_t = DEFAULT_ARCHIVE_CAPACITY)]
    archive_capacity: usize,

    /// Shortest accepted room name, in characters
    #[arg(long, default_value_t = DEFAULT_MIN_ROOM_NAME_LEN)]
    min_room_name_len: usize,

    /// Longest accepted room name, in characters
    #[arg(long, default_value_t = DEFAULT_MAX_ROOM_NAME_LEN)]
    max_room_name_len: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let policy = match RoomPolicy::new(
        args.max_members,
        args.archive_capacity,
        args.min_room_name_len,
        args.max_room_name_len,
    ) {
        Ok(policy) => policy,
        Err(e) => {
            tracing::error!("Invalid room policy: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Room policy: max {} members, {} archived lines, room name {:?} characters",
        policy.max_members(),
        policy.archive_capacity(),
        policy.room_name_length()
    );

    let server = build_server(policy);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
