//! Multi-room WebSocket chat server: router, connection sessions and HTTP API.

mod handler;
mod server;
pub mod session;
mod signal;
pub mod state;

pub use server::Server;
