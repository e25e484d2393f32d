//! Room policy: membership, archive, and naming limits.

use std::ops::RangeInclusive;

use super::error::PolicyError;

/// Default maximum number of members in one room.
pub const DEFAULT_MAX_MEMBERS: usize = 100;
/// Default number of chat lines kept in a room's archive.
pub const DEFAULT_ARCHIVE_CAPACITY: usize = 100;
/// Default shortest accepted room name, in characters.
pub const DEFAULT_MIN_ROOM_NAME_LEN: usize = 3;
/// Default longest accepted room name, in characters.
pub const DEFAULT_MAX_ROOM_NAME_LEN: usize = 8;

/// Limits applied to every room of a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPolicy {
    max_members: usize,
    archive_capacity: usize,
    room_name_length: RangeInclusive<usize>,
}

impl RoomPolicy {
    /// Create a policy after checking that the limits are usable.
    ///
    /// # Errors
    ///
    /// * [`PolicyError::NoMembersAllowed`] if `max_members` is zero
    /// * [`PolicyError::InvalidRoomNameLength`] if `min_room_name_len` is zero
    ///   or greater than `max_room_name_len`
    pub fn new(
        max_members: usize,
        archive_capacity: usize,
        min_room_name_len: usize,
        max_room_name_len: usize,
    ) -> Result<Self, PolicyError> {
        if max_members == 0 {
            return Err(PolicyError::NoMembersAllowed);
        }
        if min_room_name_len == 0 || min_room_name_len > max_room_name_len {
            return Err(PolicyError::InvalidRoomNameLength {
                min: min_room_name_len,
                max: max_room_name_len,
            });
        }
        Ok(Self {
            max_members,
            archive_capacity,
            room_name_length: min_room_name_len..=max_room_name_len,
        })
    }

    pub fn max_members(&self) -> usize {
        self.max_members
    }

    pub fn archive_capacity(&self) -> usize {
        self.archive_capacity
    }

    pub fn room_name_length(&self) -> &RangeInclusive<usize> {
        &self.room_name_length
    }
}

impl Default for RoomPolicy {
    fn default() -> Self {
        Self {
            max_members: DEFAULT_MAX_MEMBERS,
            archive_capacity: DEFAULT_ARCHIVE_CAPACITY,
            room_name_length: DEFAULT_MIN_ROOM_NAME_LEN..=DEFAULT_MAX_ROOM_NAME_LEN,
        }
    }
}
