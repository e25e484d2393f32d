//! UseCase: メッセージ送信処理
//!
//! チャット本文をアーカイブし、送信者以外の全メンバーに配信します。
//! 送信者がすでにキックされていた場合は interrupt を返してセッションを終了させます。

use std::sync::Arc;

use roomchat_shared::time::Clock;

use crate::domain::{
    ArchiveEntry, MemberName, MembershipStatus, MessagePusher, RoomRegistry, Timestamp,
};

use super::{error::SendMessageError, session::ChatSession};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 配信済み
    /// * `Err(SendMessageError::Kicked)` - 送信者はメンバーではない。interrupt は送信済み
    pub async fn execute(&self, session: &ChatSession, text: String) -> Result<(), SendMessageError> {
        let entry = ArchiveEntry::new(
            Timestamp::new(self.clock.now_millis()),
            session.member.clone(),
            text,
        );
        let status = self
            .registry
            .post_message(&session.room, &session.connection, entry)
            .await;
        self.handle_status(session, status).await
    }

    /// テキスト以外の受信単位を処理する。メンバーでなければ interrupt を送る。
    pub async fn confirm_membership(&self, session: &ChatSession) -> Result<(), SendMessageError> {
        let status = self
            .registry
            .confirm_membership(&session.room, &session.member, &session.connection.id)
            .await;
        self.handle_status(session, status).await
    }

    async fn handle_status(
        &self,
        session: &ChatSession,
        status: MembershipStatus,
    ) -> Result<(), SendMessageError> {
        match status {
            MembershipStatus::Member => Ok(()),
            MembershipStatus::Evicted { admin } => {
                let admin: MemberName = admin.unwrap_or_else(|| session.admin.clone());
                let error = SendMessageError::Kicked {
                    admin: admin.into_string(),
                };
                tracing::info!(
                    "'{}' was removed from '{}': {}",
                    session.member,
                    session.room,
                    error
                );
                let interrupt = session.interrupt(error.to_string());
                if let Err(e) = self
                    .message_pusher
                    .push_to(&session.connection, &interrupt)
                    .await
                {
                    tracing::warn!("Failed to send interrupt to '{}': {}", session.member, e);
                }
                Err(error)
            }
        }
    }
}
