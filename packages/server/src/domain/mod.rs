//! Domain layer for the multi-room chat server.
//!
//! This module contains the room/member model and the seams the rest of the
//! server depends on. It is independent of DTOs and of the transport.

pub mod archive;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod policy;
pub mod repository;
pub mod value_object;

pub use archive::{ArchiveEntry, MessageArchive};
pub use entity::{ConnectionHandle, Member, MemberSnapshot, Room, RoomSnapshot};
pub use error::{JoinError, MessagePushError, PolicyError, RegistryError, ValueObjectError};
pub use event::RoomEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use policy::RoomPolicy;
pub use repository::{JoinReceipt, KickOutcome, LeaveOutcome, MembershipStatus, RoomRegistry};
pub use value_object::{ConnectionId, MemberName, RoomName, Timestamp};
