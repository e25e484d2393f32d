//! Events the server pushes to connections.

use super::value_object::{MemberName, RoomName};

/// A server-to-client event, independent of its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Sent to a member right after it joined.
    Connect {
        name: MemberName,
        chat: RoomName,
        admin: MemberName,
        archive: String,
    },
    /// Someone joined; carries the full member list.
    Join {
        name: MemberName,
        chat_users: Vec<MemberName>,
    },
    /// A chat line from `name`.
    Sent { name: MemberName, text: String },
    /// Someone left or was kicked; carries the remaining member list.
    Disconnect {
        name: MemberName,
        chat_users: Vec<MemberName>,
    },
    /// The receiving connection is being turned away.
    ///
    /// Carries raw strings since a rejected join may not have valid names.
    Interrupt {
        name: String,
        chat: String,
        message: String,
    },
}
