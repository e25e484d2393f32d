//! UseCase: メンバーのキック
//!
//! 管理者が自分のルームのメンバーを削除します。キックされた側には即座には
//! 通知されず、次の受信時に interrupt を受け取ります。

use std::sync::Arc;

use crate::domain::{KickOutcome, MemberName, RoomRegistry};

use super::{error::KickMemberError, session::ChatSession};

/// クライアントから届いたキック要求（未検証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickCommand {
    pub chat_name: String,
    pub user: String,
    pub kick_user: String,
}

/// キックのユースケース
pub struct KickMemberUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl KickMemberUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// キックを実行
    ///
    /// 要求はセッション自身のルームに対してのみ、かつセッション自身の名前で
    /// 発行された場合に受け付けます。
    pub async fn execute(
        &self,
        session: &ChatSession,
        command: KickCommand,
    ) -> Result<KickOutcome, KickMemberError> {
        if command.chat_name != session.room.as_str() {
            return Err(KickMemberError::OtherRoom {
                requested: command.chat_name,
                current: session.room.as_str().to_string(),
            });
        }
        if command.user != session.member.as_str() {
            return Err(KickMemberError::Impersonation {
                claimed: command.user,
                actual: session.member.as_str().to_string(),
            });
        }

        let target = MemberName::new(command.kick_user)?;
        let outcome = self
            .registry
            .kick(&session.room, &session.member, &target)
            .await?;

        match outcome {
            KickOutcome::Kicked => {
                tracing::info!("'{}' kicked '{}' from '{}'", session.member, target, session.room)
            }
            KickOutcome::NotAdmin => tracing::debug!(
                "Ignoring kick from non-admin '{}' in '{}'",
                session.member,
                session.room
            ),
            KickOutcome::NoSuchMember => {
                tracing::debug!("'{}' is not in '{}'", target, session.room)
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ConnectionHandle, Member, MessagePusher, RoomName, RoomPolicy, Timestamp,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
        },
    };
    use roomchat_shared::time::FixedClock;
    use tokio::sync::mpsc;

    async fn join(registry: &InMemoryRoomRegistry, name: &str) -> ChatSession {
        let (tx, _rx) = mpsc::unbounded_channel();
        let connection = ConnectionHandle::new(tx);
        let room = RoomName::new("abc".to_string(), &RoomPolicy::default()).unwrap();
        let member = MemberName::new(name.to_string()).unwrap();
        let receipt = registry
            .join(
                room.clone(),
                Member::new(member.clone(), connection.clone(), Timestamp::new(0)),
            )
            .await
            .unwrap();
        ChatSession {
            room,
            member,
            admin: receipt.admin,
            connection,
        }
    }

    fn create_fixture() -> (Arc<InMemoryRoomRegistry>, KickMemberUseCase) {
        let pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
        let registry = Arc::new(InMemoryRoomRegistry::new(
            RoomPolicy::default(),
            Arc::new(FixedClock::new(0)),
            pusher,
        ));
        let usecase = KickMemberUseCase::new(registry.clone());
        (registry, usecase)
    }

    fn command(chat_name: &str, user: &str, kick_user: &str) -> KickCommand {
        KickCommand {
            chat_name: chat_name.to_string(),
            user: user.to_string(),
            kick_user: kick_user.to_string(),
        }
    }

    async fn member_names(registry: &InMemoryRoomRegistry) -> Vec<String> {
        registry
            .find_room("abc")
            .await
            .unwrap()
            .members
            .into_iter()
            .map(|m| m.name.into_string())
            .collect()
    }

    #[tokio::test]
    async fn test_admin_kicks_member() {
        // テスト項目: 管理者はメンバーをキックできる
        // given (前提条件):
        let (registry, usecase) = create_fixture();
        let alice = join(&registry, "alice").await;
        join(&registry, "bob").await;

        // when (操作):
        let outcome = usecase
            .execute(&alice, command("abc", "alice", "bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, KickOutcome::Kicked);
        assert_eq!(member_names(&registry).await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_non_admin_kick_is_ignored() {
        // テスト項目: 管理者以外のキックは何も変えない
        // given (前提条件):
        let (registry, usecase) = create_fixture();
        join(&registry, "alice").await;
        let bob = join(&registry, "bob").await;

        // when (操作):
        let outcome = usecase
            .execute(&bob, command("abc", "bob", "alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, KickOutcome::NotAdmin);
        assert_eq!(member_names(&registry).await, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_kick_claiming_admin_name_is_rejected() {
        // テスト項目: 他人の名前を騙ったキックは拒否される
        // given (前提条件):
        let (registry, usecase) = create_fixture();
        join(&registry, "alice").await;
        let bob = join(&registry, "bob").await;

        // when (操作):
        let result = usecase.execute(&bob, command("abc", "alice", "bob")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(KickMemberError::Impersonation { .. })));
        assert_eq!(member_names(&registry).await, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_kick_for_other_room_is_rejected() {
        // テスト項目: 自分のルーム以外へのキック要求は無視される
        // given (前提条件):
        let (registry, usecase) = create_fixture();
        let alice = join(&registry, "alice").await;
        join(&registry, "bob").await;

        // when (操作):
        let result = usecase.execute(&alice, command("xyz", "alice", "bob")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(KickMemberError::OtherRoom { .. })));
        assert_eq!(member_names(&registry).await, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_kick_unknown_member() {
        // テスト項目: 存在しないメンバーのキックは NoSuchMember
        // given (前提条件):
        let (registry, usecase) = create_fixture();
        let alice = join(&registry, "alice").await;

        // when (操作):
        let outcome = usecase
            .execute(&alice, command("abc", "alice", "carol"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, KickOutcome::NoSuchMember);
    }
}
