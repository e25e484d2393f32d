//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, KickMemberUseCase, LeaveRoomUseCase,
    SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// KickMemberUseCase（キックのユースケース）
    pub kick_member_usecase: Arc<KickMemberUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
