//! Entities of the chat domain: members and rooms.

use std::collections::HashSet;

use super::{
    archive::{ArchiveEntry, MessageArchive},
    error::JoinError,
    message_pusher::PusherChannel,
    value_object::{ConnectionId, MemberName, RoomName, Timestamp},
};

/// Send-capable endpoint of one client connection.
///
/// The session owns the original; rooms hold clones for the duration of
/// membership. Two handles are the same connection iff their ids match.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub channel: PusherChannel,
}

impl ConnectionHandle {
    pub fn new(channel: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            channel,
        }
    }
}

/// A named connection inside a room.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: MemberName,
    pub connection: ConnectionHandle,
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(name: MemberName, connection: ConnectionHandle, joined_at: Timestamp) -> Self {
        Self {
            name,
            connection,
            joined_at,
        }
    }
}

/// Read-only view of a member, without its connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub name: MemberName,
    pub joined_at: Timestamp,
}

/// Read-only view of a room, detached from the registry lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub name: RoomName,
    pub admin: MemberName,
    pub members: Vec<MemberSnapshot>,
    pub archive: Vec<String>,
    pub created_at: Timestamp,
}

/// A chat room.
///
/// Members are kept in join order. The admin is the founding member and is
/// never reassigned, even after the founder leaves.
#[derive(Debug)]
pub struct Room {
    pub name: RoomName,
    pub admin: MemberName,
    pub members: Vec<Member>,
    pub archive: MessageArchive,
    pub created_at: Timestamp,
    max_members: usize,
    /// Connections kicked from this room whose departure is not announced yet.
    evicted: HashSet<ConnectionId>,
}

impl Room {
    /// Create a room whose first member is `founder`, who becomes the admin.
    pub fn with_capacity(
        name: RoomName,
        founder: Member,
        created_at: Timestamp,
        max_members: usize,
        archive_capacity: usize,
    ) -> Self {
        Self {
            name,
            admin: founder.name.clone(),
            members: vec![founder],
            archive: MessageArchive::with_capacity(archive_capacity),
            created_at,
            max_members,
            evicted: HashSet::new(),
        }
    }

    /// Add a member, checking capacity and then name uniqueness.
    pub fn add_member(&mut self, member: Member) -> Result<(), JoinError> {
        if self.members.len() >= self.max_members {
            return Err(JoinError::RoomFull {
                room: self.name.as_str().to_string(),
                max: self.max_members,
            });
        }
        if self.has_member(&member.name) {
            return Err(JoinError::DuplicateName(member.name.into_string()));
        }
        self.members.push(member);
        Ok(())
    }

    pub fn has_member(&self, name: &MemberName) -> bool {
        self.members.iter().any(|m| &m.name == name)
    }

    pub fn has_connection(&self, connection_id: &ConnectionId) -> bool {
        self.members
            .iter()
            .any(|m| &m.connection.id == connection_id)
    }

    pub fn is_admin(&self, name: &MemberName) -> bool {
        &self.admin == name
    }

    /// Kick the member called `name`, if any, remembering its connection
    /// until [`Room::take_evicted`] claims it.
    pub fn evict_member(&mut self, name: &MemberName) -> Option<Member> {
        let index = self.members.iter().position(|m| &m.name == name)?;
        let member = self.members.remove(index);
        self.evicted.insert(member.connection.id);
        Some(member)
    }

    /// Whether `connection_id` was kicked from this room and not yet claimed.
    /// Claims it, so each eviction is reported once.
    pub fn take_evicted(&mut self, connection_id: &ConnectionId) -> bool {
        self.evicted.remove(connection_id)
    }

    /// Remove the member whose connection is `connection_id`, if any.
    pub fn remove_connection(&mut self, connection_id: &ConnectionId) -> Option<Member> {
        let index = self
            .members
            .iter()
            .position(|m| &m.connection.id == connection_id)?;
        Some(self.members.remove(index))
    }

    pub fn append_message(&mut self, entry: ArchiveEntry) {
        self.archive.append(entry);
    }

    pub fn member_names(&self) -> Vec<MemberName> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }

    /// Connections of every current member.
    pub fn connections(&self) -> Vec<ConnectionHandle> {
        self.members.iter().map(|m| m.connection.clone()).collect()
    }

    /// Connections of every current member except `exclude`.
    pub fn connections_except(&self, exclude: &ConnectionId) -> Vec<ConnectionHandle> {
        self.members
            .iter()
            .filter(|m| &m.connection.id != exclude)
            .map(|m| m.connection.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            name: self.name.clone(),
            admin: self.admin.clone(),
            members: self
                .members
                .iter()
                .map(|m| MemberSnapshot {
                    name: m.name.clone(),
                    joined_at: m.joined_at,
                })
                .collect(),
            archive: self.archive.rendered_entries(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomPolicy;
    use tokio::sync::mpsc;

    fn member(name: &str) -> Member {
        let (tx, _rx) = mpsc::unbounded_channel();
        Member::new(
            MemberName::new(name.to_string()).unwrap(),
            ConnectionHandle::new(tx),
            Timestamp::new(1000),
        )
    }

    fn room_with_founder(founder: &str, max_members: usize) -> Room {
        Room::with_capacity(
            RoomName::new("abc".to_string(), &RoomPolicy::default()).unwrap(),
            member(founder),
            Timestamp::new(0),
            max_members,
            100,
        )
    }

    #[test]
    fn test_founder_becomes_admin() {
        // テスト項目: ルームの最初のメンバーが管理者になる
        // given (前提条件):

        // when (操作):
        let room = room_with_founder("alice", 100);

        // then (期待する結果):
        assert_eq!(room.admin.as_str(), "alice");
        assert_eq!(room.members.len(), 1);
    }

    #[test]
    fn test_add_member_keeps_join_order() {
        // テスト項目: メンバー一覧は参加順を保持する
        // given (前提条件):
        let mut room = room_with_founder("charlie", 100);

        // when (操作):
        room.add_member(member("alice")).unwrap();
        room.add_member(member("bob")).unwrap();

        // then (期待する結果):
        let names: Vec<String> = room
            .member_names()
            .into_iter()
            .map(MemberName::into_string)
            .collect();
        assert_eq!(names, vec!["charlie", "alice", "bob"]);
    }

    #[test]
    fn test_add_member_rejects_when_full() {
        // テスト項目: 満員のルームへの参加は拒否され、メンバーは変化しない
        // given (前提条件):
        let mut room = room_with_founder("alice", 2);
        room.add_member(member("bob")).unwrap();

        // when (操作):
        let result = room.add_member(member("charlie"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinError::RoomFull {
                room: "abc".to_string(),
                max: 2,
            })
        );
        assert_eq!(room.members.len(), 2);
    }

    #[test]
    fn test_add_member_rejects_duplicate_name() {
        // テスト項目: 同名のメンバーは拒否され、既存メンバーの接続はそのまま
        // given (前提条件):
        let mut room = room_with_founder("alice", 100);
        let original = room.members[0].connection.id;

        // when (操作):
        let result = room.add_member(member("alice"));

        // then (期待する結果):
        assert_eq!(result, Err(JoinError::DuplicateName("alice".to_string())));
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.members[0].connection.id, original);
    }

    #[test]
    fn test_remove_connection_only_matches_identity() {
        // テスト項目: 接続 ID で削除すると、同名でも別接続のメンバーは削除されない
        // given (前提条件):
        let mut room = room_with_founder("alice", 100);
        let kicked = member("bob");
        let kicked_id = kicked.connection.id;
        room.add_member(kicked).unwrap();
        room.evict_member(&MemberName::new("bob".to_string()).unwrap());
        room.add_member(member("bob")).unwrap();

        // when (操作):
        let removed = room.remove_connection(&kicked_id);

        // then (期待する結果):
        assert!(removed.is_none());
        assert_eq!(room.members.len(), 2);
        assert!(!room.has_connection(&kicked_id));
    }

    #[test]
    fn test_evicted_connection_is_claimed_once() {
        // テスト項目: キックされた接続はこのルームで 1 度だけ検出され、他の接続は該当しない
        // given (前提条件):
        let mut room = room_with_founder("alice", 100);
        let bob = member("bob");
        let bob_id = bob.connection.id;
        room.add_member(bob).unwrap();
        let stranger = member("carol").connection.id;

        // when (操作):
        let evicted = room.evict_member(&MemberName::new("bob".to_string()).unwrap());

        // then (期待する結果):
        assert!(evicted.is_some());
        assert!(!room.take_evicted(&stranger));
        assert!(room.take_evicted(&bob_id));
        assert!(!room.take_evicted(&bob_id));
    }

    #[test]
    fn test_connections_except_excludes_sender() {
        // テスト項目: 送信者以外の接続だけが返される
        // given (前提条件):
        let mut room = room_with_founder("alice", 100);
        room.add_member(member("bob")).unwrap();
        let alice_id = room.members[0].connection.id;

        // when (操作):
        let targets = room.connections_except(&alice_id);

        // then (期待する結果):
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, room.members[1].connection.id);
    }
}
