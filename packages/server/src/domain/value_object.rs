//! Value objects of the chat domain.

use std::{borrow::Borrow, fmt};

use uuid::Uuid;

use super::{error::ValueObjectError, policy::RoomPolicy};

/// Name of a chat room, validated against the room policy's length bounds.
///
/// Length is counted in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    /// Validate `raw` against `policy` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`ValueObjectError::RoomNameLength`] when the character count is
    /// outside the policy's inclusive bounds.
    pub fn new(raw: String, policy: &RoomPolicy) -> Result<Self, ValueObjectError> {
        let length = raw.chars().count();
        if !policy.room_name_length().contains(&length) {
            return Err(ValueObjectError::RoomNameLength {
                name: raw,
                min: *policy.room_name_length().start(),
                max: *policy.room_name_length().end(),
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for RoomName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name a member uses inside a room. Unique within one room at any instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberName(String);

impl MemberName {
    pub fn new(raw: String) -> Result<Self, ValueObjectError> {
        if raw.trim().is_empty() {
            return Err(ValueObjectError::EmptyMemberName);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MemberName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one client connection, independent of the name it joined with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
