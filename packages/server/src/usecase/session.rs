//! Identity of a joined connection.

use crate::domain::{ConnectionHandle, MemberName, RoomEvent, RoomName};

/// Everything a connection needs to act inside the room it joined.
///
/// Owned by the connection's task; the registry only holds a clone of
/// `connection`.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub room: RoomName,
    pub member: MemberName,
    /// Admin of the room when this session joined.
    pub admin: MemberName,
    pub connection: ConnectionHandle,
}

impl ChatSession {
    pub fn interrupt(&self, message: String) -> RoomEvent {
        RoomEvent::Interrupt {
            name: self.member.as_str().to_string(),
            chat: self.room.as_str().to_string(),
            message,
        }
    }
}
