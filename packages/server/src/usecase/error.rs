//! UseCase error types.

use thiserror::Error;

use crate::domain::{JoinError, RegistryError, ValueObjectError};

/// Why a connection could not join. The `Display` text is the `interrupt`
/// message sent to the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    #[error(transparent)]
    Rejected(#[from] JoinError),
}

/// The session can no longer send; it must close.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Admin ({admin}) kick you!")]
    Kicked { admin: String },
}

/// Kick commands that were ignored.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KickMemberError {
    #[error("kick targets room '{requested}' but the session is in '{current}'")]
    OtherRoom { requested: String, current: String },

    #[error("kick issued as '{claimed}' by session '{actual}'")]
    Impersonation { claimed: String, actual: String },

    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
