//! Domain error types.

use thiserror::Error;

/// Value object validation errors.
///
/// The `Display` text is sent verbatim to clients in `interrupt` events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("The length of the chat name ({name}) must be between {min} and {max} characters.")]
    RoomNameLength { name: String, min: usize, max: usize },

    #[error("The user name must not be empty.")]
    EmptyMemberName,
}

/// Reasons an existing room refuses a new member.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("The number of chat users ({room}) has exceeded {max}.")]
    RoomFull { room: String, max: usize },

    #[error("{0} already exists!")]
    DuplicateName(String),
}

/// Invalid room policy configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("max members must be at least 1")]
    NoMembersAllowed,

    #[error("invalid room name length bounds: {min}..={max}")]
    InvalidRoomNameLength { min: usize, max: usize },
}

/// Registry lookup errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// Errors while pushing an event to a connection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("Failed to serialize event: {0}")]
    Serialization(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
