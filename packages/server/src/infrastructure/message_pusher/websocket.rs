//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - `RoomEvent` を wire 形式（JSON）にエンコード
//! - 接続ごとの送信キュー（`PusherChannel`）への投入
//!
//! ソケットへの実際の書き込みは UI 層の writer タスクが行います。

use async_trait::async_trait;

use crate::domain::{ConnectionHandle, MessagePushError, MessagePusher, RoomEvent};
use crate::infrastructure::dto::websocket::ServerEvent;

/// WebSocket を使った MessagePusher 実装
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketMessagePusher;

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self
    }

    fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(event))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(
        &self,
        target: &ConnectionHandle,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        target
            .channel
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", target.id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionHandle>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;

        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = target.channel.send(content.clone()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    target.id,
                    e
                );
            } else {
                tracing::debug!("Broadcasted message to connection '{}'", target.id);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberName;
    use tokio::sync::mpsc;

    fn sent_event(text: &str) -> RoomEvent {
        RoomEvent::Sent {
            name: MemberName::new("alice".to_string()).unwrap(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にエンコード済みのイベントが届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::new(tx);

        // when (操作):
        let result = pusher.push_to(&handle, &sent_event("Hello")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            rx.recv().await,
            Some(r#"{"action":"sent","name":"alice","text":"Hello"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_push_to_closed_connection() {
        // テスト項目: 閉じた接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::new(tx);
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&handle, &sent_event("Hello")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_continues_after_failed_target() {
        // テスト項目: 途中の接続が閉じていても、残りの接続には届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        drop(rx2);
        let targets = vec![
            ConnectionHandle::new(tx1),
            ConnectionHandle::new(tx2),
            ConnectionHandle::new(tx3),
        ];

        // when (操作):
        let result = pusher.broadcast(targets, &sent_event("Broadcast")).await;

        // then (期待する結果):
        assert!(result.is_ok()); // ブロードキャストは部分失敗を許容
        assert!(rx1.recv().await.is_some());
        assert!(rx3.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.broadcast(vec![], &sent_event("Message")).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
