//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub admin: String,
    pub members: Vec<String>,
    pub message_count: usize,
    /// RFC 3339, UTC
    pub created_at: String,
}

/// Body of `GET /api/rooms/{room_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub admin: String,
    pub members: Vec<MemberDetailDto>,
    pub archive: Vec<String>,
    /// RFC 3339, UTC
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub name: String,
    /// RFC 3339, UTC
    pub joined_at: String,
}
