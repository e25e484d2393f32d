//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, KickMemberUseCase, LeaveRoomUseCase,
    SendMessageUseCase,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, root_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Multi-room WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = roomchat_server::build_server(RoomPolicy::default());
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `join_room_usecase` - UseCase for joining a room
    /// * `send_message_usecase` - UseCase for posting chat text
    /// * `kick_member_usecase` - UseCase for admin kicks
    /// * `leave_room_usecase` - UseCase for connection teardown
    /// * `get_rooms_usecase` - UseCase for the room list
    /// * `get_room_detail_usecase` - UseCase for one room's detail
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        kick_member_usecase: Arc<KickMemberUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                join_room_usecase,
                send_message_usecase,
                kick_member_usecase,
                leave_room_usecase,
                get_rooms_usecase,
                get_room_detail_usecase,
            }),
        }
    }

    /// Build the router without binding a socket.
    pub fn into_router(self) -> Router {
        Router::new()
            // WebSocket エンドポイント（アップグレードでない GET にはトップページを返す）
            .route("/", get(root_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_name}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    /// Run the chat server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
