//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する `RoomRegistry` trait の具体的な実装。
//! 全ルームを 1 つの `HashMap` に保持し、単一の `Mutex` で直列化します。
//!
//! 操作が発生させるイベントはロックを保持したまま `MessagePusher` に渡します。
//! 送信キューへの投入は非ブロッキングなので、ロック保持時間は短いままです。

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use async_trait::async_trait;
use roomchat_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ArchiveEntry, ConnectionHandle, ConnectionId, JoinError, JoinReceipt, KickOutcome,
    LeaveOutcome, Member, MemberName, MembershipStatus, MessagePusher, RegistryError, Room,
    RoomEvent, RoomName, RoomPolicy, RoomRegistry, RoomSnapshot, Timestamp,
};

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomName, Room>>,
    policy: RoomPolicy,
    clock: Arc<dyn Clock>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new(
        policy: RoomPolicy,
        clock: Arc<dyn Clock>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            policy,
            clock,
            message_pusher,
        }
    }

    async fn deliver(&self, targets: Vec<ConnectionHandle>, event: &RoomEvent) {
        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to broadcast {:?}: {}", event, e);
        }
    }

    /// Report a connection that is no longer in `room`.
    ///
    /// If it was kicked from this very room, the remaining members are told
    /// that `name` is gone. A connection unknown to `room` (its own room was
    /// deleted and the name reused) is reported without touching `room`.
    async fn announce_eviction(
        &self,
        room: &mut Room,
        name: &MemberName,
        connection: &ConnectionId,
    ) -> MembershipStatus {
        if !room.take_evicted(connection) {
            tracing::debug!(
                "'{}' does not belong to the current room '{}'",
                name,
                room.name
            );
            return MembershipStatus::Evicted { admin: None };
        }
        tracing::info!(
            "'{}' is no longer a member of room '{}'",
            name,
            room.name
        );
        let event = RoomEvent::Disconnect {
            name: name.clone(),
            chat_users: room.member_names(),
        };
        self.deliver(room.connections(), &event).await;
        MembershipStatus::Evicted {
            admin: Some(room.admin.clone()),
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room_name: RoomName, member: Member) -> Result<JoinReceipt, JoinError> {
        let mut rooms = self.rooms.lock().await;
        let name = member.name.clone();
        let connection = member.connection.clone();

        let (room, created) = match rooms.entry(room_name) {
            Entry::Occupied(entry) => {
                let room = entry.into_mut();
                room.add_member(member)?;
                (room, false)
            }
            Entry::Vacant(entry) => {
                let room = Room::with_capacity(
                    entry.key().clone(),
                    member,
                    Timestamp::new(self.clock.now_millis()),
                    self.policy.max_members(),
                    self.policy.archive_capacity(),
                );
                (entry.insert(room), true)
            }
        };

        if created {
            tracing::info!("Room '{}' created, admin is '{}'", room.name, room.admin);
        }
        tracing::info!(
            "'{}' joined room '{}' ({} members)",
            name,
            room.name,
            room.members.len()
        );

        let connect = RoomEvent::Connect {
            name: name.clone(),
            chat: room.name.clone(),
            admin: room.admin.clone(),
            archive: room.archive.render(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection, &connect).await {
            tracing::warn!("Failed to send connect to '{}': {}", name, e);
        }

        let joined = RoomEvent::Join {
            name,
            chat_users: room.member_names(),
        };
        self.deliver(room.connections(), &joined).await;

        Ok(JoinReceipt {
            admin: room.admin.clone(),
            created,
        })
    }

    async fn kick(
        &self,
        room_name: &RoomName,
        requester: &MemberName,
        target: &MemberName,
    ) -> Result<KickOutcome, RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_name)
            .ok_or_else(|| RegistryError::RoomNotFound(room_name.as_str().to_string()))?;

        if !room.is_admin(requester) {
            tracing::warn!(
                "'{}' is not the admin of room '{}', ignoring kick of '{}'",
                requester,
                room_name,
                target
            );
            return Ok(KickOutcome::NotAdmin);
        }

        if room.evict_member(target).is_none() {
            return Ok(KickOutcome::NoSuchMember);
        }
        tracing::info!("Admin '{}' kicked '{}' from room '{}'", requester, target, room_name);

        // 管理者が自分自身をキックして空になった場合もルームを削除する
        if room.is_empty() {
            rooms.remove(room_name);
            tracing::info!("Room '{}' is empty and was deleted", room_name);
        }
        Ok(KickOutcome::Kicked)
    }

    async fn confirm_membership(
        &self,
        room_name: &RoomName,
        name: &MemberName,
        connection: &ConnectionId,
    ) -> MembershipStatus {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_name) {
            None => MembershipStatus::Evicted { admin: None },
            Some(room) if room.has_connection(connection) => MembershipStatus::Member,
            Some(room) => self.announce_eviction(room, name, connection).await,
        }
    }

    async fn post_message(
        &self,
        room_name: &RoomName,
        author: &ConnectionHandle,
        entry: ArchiveEntry,
    ) -> MembershipStatus {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(room_name) else {
            return MembershipStatus::Evicted { admin: None };
        };

        if !room.has_connection(&author.id) {
            return self
                .announce_eviction(room, &entry.sender, &author.id)
                .await;
        }

        let event = RoomEvent::Sent {
            name: entry.sender.clone(),
            text: entry.text.clone(),
        };
        room.append_message(entry);
        self.deliver(room.connections_except(&author.id), &event)
            .await;

        MembershipStatus::Member
    }

    async fn leave(
        &self,
        room_name: &RoomName,
        name: &MemberName,
        connection: &ConnectionId,
    ) -> LeaveOutcome {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(room_name) else {
            return LeaveOutcome::NotAMember;
        };

        let removed = room.remove_connection(connection).is_some();
        if room.is_empty() {
            rooms.remove(room_name);
            tracing::info!("Room '{}' is empty and was deleted", room_name);
            return LeaveOutcome::RoomClosed;
        }
        if !removed {
            room.take_evicted(connection);
            return LeaveOutcome::NotAMember;
        }

        tracing::info!("'{}' left room '{}'", name, room_name);
        let event = RoomEvent::Disconnect {
            name: name.clone(),
            chat_users: room.member_names(),
        };
        self.deliver(room.connections(), &event).await;

        LeaveOutcome::Left {
            remaining: room.members.len(),
        }
    }

    async fn list_rooms(&self) -> Vec<RoomSnapshot> {
        let rooms = self.rooms.lock().await;
        let mut snapshots: Vec<RoomSnapshot> = rooms.values().map(Room::snapshot).collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        snapshots
    }

    async fn find_room(&self, room_name: &str) -> Result<RoomSnapshot, RegistryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_name)
            .map(Room::snapshot)
            .ok_or_else(|| RegistryError::RoomNotFound(room_name.to_string()))
    }
}
