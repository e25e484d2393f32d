//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム名・ユーザー名の検証と、拒否時の interrupt 送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しいルームの作成、既存ルームへの参加
//! - 異常系：ルーム名の長さ違反、満員、重複名
//! - いずれの異常系でもルームの状態は変化しない

use std::sync::Arc;

use roomchat_shared::time::Clock;

use crate::domain::{
    ConnectionHandle, Member, MemberName, MessagePusher, RoomEvent, RoomName, RoomPolicy,
    RoomRegistry, Timestamp,
};

use super::{error::JoinRoomError, session::ChatSession};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    policy: RoomPolicy,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        policy: RoomPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            policy,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `user` - 希望するメンバー名（未検証）
    /// * `chat_name` - 参加するルーム名（未検証）
    /// * `connection` - この接続の送信ハンドル
    ///
    /// # Returns
    ///
    /// * `Ok(ChatSession)` - 参加成功。connect / join は送信済み
    /// * `Err(JoinRoomError)` - 参加失敗。`connection` には interrupt を送信済み
    pub async fn execute(
        &self,
        user: String,
        chat_name: String,
        connection: ConnectionHandle,
    ) -> Result<ChatSession, JoinRoomError> {
        match self.try_join(user.clone(), chat_name.clone(), connection.clone()).await {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::info!("'{}' cannot join '{}': {}", user, chat_name, e);
                let interrupt = RoomEvent::Interrupt {
                    name: user,
                    chat: chat_name,
                    message: e.to_string(),
                };
                if let Err(push_error) = self.message_pusher.push_to(&connection, &interrupt).await {
                    tracing::warn!("Failed to send interrupt: {}", push_error);
                }
                Err(e)
            }
        }
    }

    async fn try_join(
        &self,
        user: String,
        chat_name: String,
        connection: ConnectionHandle,
    ) -> Result<ChatSession, JoinRoomError> {
        // ルーム名の長さを先に検証する
        let room = RoomName::new(chat_name, &self.policy)?;
        let name = MemberName::new(user)?;

        let joined_at = Timestamp::new(self.clock.now_millis());
        let member = Member::new(name.clone(), connection.clone(), joined_at);
        let receipt = self.registry.join(room.clone(), member).await?;

        Ok(ChatSession {
            room,
            member: name,
            admin: receipt.admin,
            connection,
        })
    }
}
