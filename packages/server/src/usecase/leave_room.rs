//! UseCase: ルーム退出処理

use std::sync::Arc;

use crate::domain::{LeaveOutcome, RoomRegistry};

use super::session::ChatSession;

/// ルーム退出のユースケース
///
/// 接続終了時に必ず 1 回呼ばれます。キック済みのセッションでも安全に呼べます。
pub struct LeaveRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, session: &ChatSession) -> LeaveOutcome {
        let outcome = self
            .registry
            .leave(&session.room, &session.member, &session.connection.id)
            .await;
        match &outcome {
            LeaveOutcome::Left { remaining } => tracing::info!(
                "'{}' left '{}' ({} remaining)",
                session.member,
                session.room,
                remaining
            ),
            LeaveOutcome::RoomClosed => {
                tracing::info!("'{}' left; room '{}' closed", session.member, session.room)
            }
            LeaveOutcome::NotAMember => {
                tracing::debug!("'{}' had already been removed from '{}'", session.member, session.room)
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ConnectionHandle, Member, MemberName, MessagePusher, RoomName, RoomPolicy, Timestamp,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
        },
    };
    use roomchat_shared::time::FixedClock;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_leave_notifies_and_closes_room() {
        // テスト項目: 退出で残りのメンバーに disconnect が届き、最後の退出でルームが削除される
        // given (前提条件):
        let pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
        let registry = Arc::new(InMemoryRoomRegistry::new(
            RoomPolicy::default(),
            Arc::new(FixedClock::new(0)),
            pusher,
        ));
        let usecase = LeaveRoomUseCase::new(registry.clone());
        let room = RoomName::new("abc".to_string(), &RoomPolicy::default()).unwrap();

        let mut sessions = Vec::new();
        let mut receivers = Vec::new();
        for name in ["alice", "bob"] {
            let (tx, rx) = mpsc::unbounded_channel();
            let connection = ConnectionHandle::new(tx);
            let member = MemberName::new(name.to_string()).unwrap();
            let receipt = registry
                .join(
                    room.clone(),
                    Member::new(member.clone(), connection.clone(), Timestamp::new(0)),
                )
                .await
                .unwrap();
            sessions.push(ChatSession {
                room: room.clone(),
                member,
                admin: receipt.admin,
                connection,
            });
            receivers.push(rx);
        }
        while receivers[0].try_recv().is_ok() {}

        // when (操作):
        let first = usecase.execute(&sessions[0]).await;
        let second = usecase.execute(&sessions[1]).await;

        // then (期待する結果):
        assert_eq!(first, LeaveOutcome::Left { remaining: 1 });
        assert_eq!(second, LeaveOutcome::RoomClosed);
        assert!(registry.list_rooms().await.is_empty());
        assert!(receivers[0].try_recv().is_err());
    }
}
