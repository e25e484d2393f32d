//! Multi-room WebSocket chat server.
//!
//! Clients join named rooms, exchange text broadcast to the room, and are
//! subject to a per-room admin who may kick other members.

use std::sync::Arc;

use roomchat_shared::time::SystemClock;

use crate::{
    domain::RoomPolicy,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry},
    ui::Server,
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, KickMemberUseCase,
        LeaveRoomUseCase, SendMessageUseCase,
    },
};

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

/// Wire the in-memory registry, the WebSocket pusher and every usecase into a
/// [`Server`].
pub fn build_server(policy: RoomPolicy) -> Server {
    // 1. Clock / MessagePusher
    let clock = Arc::new(SystemClock);
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 2. Registry（インメモリ）
    let registry = Arc::new(InMemoryRoomRegistry::new(
        policy.clone(),
        clock.clone(),
        message_pusher.clone(),
    ));

    // 3. UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        policy,
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        message_pusher,
        clock,
    ));
    let kick_member_usecase = Arc::new(KickMemberUseCase::new(registry.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry));

    Server::new(
        join_room_usecase,
        send_message_usecase,
        kick_member_usecase,
        leave_room_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    )
}
