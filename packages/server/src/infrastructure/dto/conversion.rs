//! Conversion logic between DTOs and domain types.

use roomchat_shared::time::timestamp_to_rfc3339;

use crate::domain::{MemberName, RoomEvent, RoomSnapshot};
use crate::infrastructure::dto::{
    http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    websocket::{KickRequest, ServerEvent},
};
use crate::usecase::KickCommand;

fn names(members: &[MemberName]) -> Vec<String> {
    members.iter().map(|m| m.as_str().to_string()).collect()
}

// ========================================
// Domain → DTO
// ========================================

impl From<&RoomEvent> for ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::Connect {
                name,
                chat,
                admin,
                archive,
            } => Self::Connect {
                name: name.as_str().to_string(),
                chat: chat.as_str().to_string(),
                admin: admin.as_str().to_string(),
                archive: archive.clone(),
            },
            RoomEvent::Join { name, chat_users } => Self::Join {
                name: name.as_str().to_string(),
                chat_users: names(chat_users),
            },
            RoomEvent::Sent { name, text } => Self::Sent {
                name: name.as_str().to_string(),
                text: text.clone(),
            },
            RoomEvent::Disconnect { name, chat_users } => Self::Disconnect {
                name: name.as_str().to_string(),
                chat_users: names(chat_users),
            },
            RoomEvent::Interrupt {
                name,
                chat,
                message,
            } => Self::Interrupt {
                name: name.clone(),
                chat: chat.clone(),
                message: message.clone(),
            },
        }
    }
}

impl From<&RoomSnapshot> for RoomSummaryDto {
    fn from(room: &RoomSnapshot) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            admin: room.admin.as_str().to_string(),
            members: room
                .members
                .iter()
                .map(|m| m.name.as_str().to_string())
                .collect(),
            message_count: room.archive.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<RoomSnapshot> for RoomDetailDto {
    fn from(room: RoomSnapshot) -> Self {
        Self {
            name: room.name.into_string(),
            admin: room.admin.into_string(),
            members: room
                .members
                .into_iter()
                .map(|m| MemberDetailDto {
                    name: m.name.into_string(),
                    joined_at: timestamp_to_rfc3339(m.joined_at.value()),
                })
                .collect(),
            archive: room.archive,
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

// ========================================
// DTO → UseCase input
// ========================================

impl From<KickRequest> for KickCommand {
    fn from(request: KickRequest) -> Self {
        Self {
            chat_name: request.chat_name,
            user: request.user,
            kick_user: request.kick_user,
        }
    }
}
