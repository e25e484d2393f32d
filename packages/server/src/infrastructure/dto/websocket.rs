//! WebSocket message DTOs.
//!
//! Field names are part of the wire contract shared with browser and
//! terminal clients.

use serde::{Deserialize, Serialize};

/// Server-to-client event, tagged by its `action` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ServerEvent {
    Connect {
        name: String,
        chat: String,
        admin: String,
        archive: String,
    },
    Join {
        name: String,
        chat_users: Vec<String>,
    },
    Sent {
        name: String,
        text: String,
    },
    Disconnect {
        name: String,
        chat_users: Vec<String>,
    },
    Interrupt {
        name: String,
        chat: String,
        message: String,
    },
}

/// First message of every connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub user: String,
    pub chat_name: String,
}

/// Admin command removing `kick_user` from `chat_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickRequest {
    pub chat_name: String,
    pub user: String,
    pub kick_user: String,
}
