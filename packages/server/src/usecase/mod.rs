//! UseCase layer: one struct per operation a connection or HTTP client can
//! trigger.

pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod kick_member;
pub mod leave_room;
pub mod send_message;
pub mod session;

pub use error::{GetRoomDetailError, JoinRoomError, KickMemberError, SendMessageError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use kick_member::{KickCommand, KickMemberUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;
pub use session::ChatSession;
