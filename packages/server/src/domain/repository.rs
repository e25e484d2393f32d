//! RoomRegistry trait: the process-wide room state.
//!
//! Every operation is atomic with respect to every other one, check-then-act
//! sequences included. Events an operation triggers are handed to the
//! `MessagePusher` before the operation returns, so members observe a room's
//! events in the order its mutations were applied.

use async_trait::async_trait;

use super::{
    archive::ArchiveEntry,
    entity::{ConnectionHandle, Member, RoomSnapshot},
    error::{JoinError, RegistryError},
    value_object::{ConnectionId, MemberName, RoomName},
};

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinReceipt {
    pub admin: MemberName,
    /// Whether this join created the room.
    pub created: bool,
}

/// Result of a kick command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickOutcome {
    Kicked,
    NotAdmin,
    NoSuchMember,
}

/// Whether a connection is still a member of its room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipStatus {
    Member,
    /// The connection was removed by a kick. `admin` is `None` when the room
    /// no longer exists.
    Evicted { admin: Option<MemberName> },
}

/// Result of leaving a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Removed; `remaining` members were notified.
    Left { remaining: usize },
    /// The room is empty and was deleted.
    RoomClosed,
    /// The connection was no longer a member (kicked earlier, or the room is
    /// gone); nobody was notified.
    NotAMember,
}

#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Add `member` to `room_name`, creating the room (with `member` as admin)
    /// if it does not exist.
    ///
    /// On success the joiner receives `connect` and every member, the joiner
    /// included, receives `join`.
    async fn join(&self, room_name: RoomName, member: Member) -> Result<JoinReceipt, JoinError>;

    /// Remove `target` from `room_name` if `requester` is the room's admin.
    ///
    /// No event is sent; the removed session notices on its next inbound unit.
    async fn kick(
        &self,
        room_name: &RoomName,
        requester: &MemberName,
        target: &MemberName,
    ) -> Result<KickOutcome, RegistryError>;

    /// Check that `connection` is still a member.
    ///
    /// If it is not, the remaining members receive `disconnect` for `name`.
    async fn confirm_membership(
        &self,
        room_name: &RoomName,
        name: &MemberName,
        connection: &ConnectionId,
    ) -> MembershipStatus;

    /// Archive `entry` and send it to every member except `author`, provided
    /// `author` is still a member; otherwise behaves as
    /// [`RoomRegistry::confirm_membership`] for an evicted connection.
    async fn post_message(
        &self,
        room_name: &RoomName,
        author: &ConnectionHandle,
        entry: ArchiveEntry,
    ) -> MembershipStatus;

    /// Remove `connection` if still present, notify the rest, and delete the
    /// room once empty.
    async fn leave(
        &self,
        room_name: &RoomName,
        name: &MemberName,
        connection: &ConnectionId,
    ) -> LeaveOutcome;

    /// Snapshots of every room, ordered by name.
    async fn list_rooms(&self) -> Vec<RoomSnapshot>;

    /// Snapshot of one room.
    async fn find_room(&self, room_name: &str) -> Result<RoomSnapshot, RegistryError>;
}
