//! Per-connection session state machine.
//!
//! `Handshaking` is the upgrade itself and is handled by the router; a
//! session starts in [`SessionState::Joining`] once the socket is open.

use std::sync::Arc;

use axum::extract::ws::Message;
use futures_util::stream::{Stream, StreamExt};

use crate::{
    domain::ConnectionHandle,
    infrastructure::dto::websocket::{JoinRequest, KickRequest},
    ui::state::AppState,
    usecase::ChatSession,
};

/// Lifecycle of one connection.
#[derive(Debug)]
pub enum SessionState {
    /// Waiting for the join request.
    Joining,
    /// Member of a room.
    Active(ChatSession),
    /// Leaving the room.
    Closing(ChatSession),
    Closed,
}

/// Drives one connection from its join request to its teardown.
pub struct ConnectionSession<S> {
    state: Arc<AppState>,
    inbound: S,
    connection: ConnectionHandle,
}

impl<S> ConnectionSession<S>
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin + Send,
{
    pub fn new(state: Arc<AppState>, inbound: S, connection: ConnectionHandle) -> Self {
        Self {
            state,
            inbound,
            connection,
        }
    }

    /// Run until `Closed`. Consumes the session so the connection handle is
    /// released on return.
    pub async fn run(mut self) {
        let mut current = SessionState::Joining;
        loop {
            current = match current {
                SessionState::Joining => self.join().await,
                SessionState::Active(session) => self.receive(session).await,
                SessionState::Closing(session) => {
                    self.state.leave_room_usecase.execute(&session).await;
                    SessionState::Closed
                }
                SessionState::Closed => break,
            };
        }
        tracing::debug!("Session for connection '{}' closed", self.connection.id);
    }

    /// Next inbound unit, skipping ping/pong. `None` once the transport is gone.
    async fn next_message(&mut self) -> Option<Message> {
        loop {
            match self.inbound.next().await? {
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
                Ok(message) => return Some(message),
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", self.connection.id, e);
                    return None;
                }
            }
        }
    }

    async fn join(&mut self) -> SessionState {
        let Some(Message::Text(text)) = self.next_message().await else {
            tracing::debug!("Connection '{}' closed before joining", self.connection.id);
            return SessionState::Closed;
        };
        let request = match serde_json::from_str::<JoinRequest>(text.as_str()) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Malformed join request on '{}': {}", self.connection.id, e);
                return SessionState::Closed;
            }
        };

        match self
            .state
            .join_room_usecase
            .execute(request.user, request.chat_name, self.connection.clone())
            .await
        {
            Ok(session) => {
                tracing::info!("'{}' joined '{}'", session.member, session.room);
                SessionState::Active(session)
            }
            Err(_) => SessionState::Closed,
        }
    }

    async fn receive(&mut self, session: ChatSession) -> SessionState {
        let Some(Message::Text(text)) = self.next_message().await else {
            // バイナリ、クローズ、切断はいずれもセッション終了。キック済みなら先に通知する
            if self
                .state
                .send_message_usecase
                .confirm_membership(&session)
                .await
                .is_err()
            {
                tracing::debug!("'{}' closed after being kicked", session.member);
            }
            return SessionState::Closing(session);
        };

        if let Ok(request) = serde_json::from_str::<KickRequest>(text.as_str()) {
            if let Err(e) = self
                .state
                .kick_member_usecase
                .execute(&session, request.into())
                .await
            {
                tracing::warn!("Ignoring kick command from '{}': {}", session.member, e);
            }
            return SessionState::Active(session);
        }

        match self
            .state
            .send_message_usecase
            .execute(&session, text.as_str().to_string())
            .await
        {
            Ok(()) => SessionState::Active(session),
            Err(_) => SessionState::Closing(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePusher, RoomPolicy, RoomRegistry},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
        },
        usecase::{
            GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, KickMemberUseCase,
            LeaveRoomUseCase, SendMessageUseCase,
        },
    };
    use futures_util::stream;
    use roomchat_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn create_state() -> (Arc<InMemoryRoomRegistry>, Arc<AppState>) {
        let clock = Arc::new(FixedClock::new(0));
        let pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
        let registry = Arc::new(InMemoryRoomRegistry::new(
            RoomPolicy::default(),
            clock.clone(),
            pusher.clone(),
        ));
        let state = Arc::new(AppState {
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                registry.clone(),
                pusher.clone(),
                RoomPolicy::default(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                registry.clone(),
                pusher,
                clock,
            )),
            kick_member_usecase: Arc::new(KickMemberUseCase::new(registry.clone())),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(registry.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(registry.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry.clone())),
        });
        (registry, state)
    }

    fn text(raw: &str) -> Result<Message, axum::Error> {
        Ok(Message::Text(raw.into()))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
        let mut events = Vec::new();
        while let Ok(raw) = rx.try_recv() {
            events.push(serde_json::from_str(&raw).unwrap());
        }
        events
    }

    #[tokio::test]
    async fn test_session_joins_posts_and_leaves() {
        // テスト項目: 参加・送信・切断の一連の流れでルームが作成され、最後に削除される
        // given (前提条件):
        let (registry, state) = create_state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let inbound = stream::iter(vec![
            text(r#"{"user":"alice","chat_name":"abc"}"#),
            Ok(Message::Ping(Vec::new().into())),
            text("hello"),
        ]);

        // when (操作):
        ConnectionSession::new(state, inbound, ConnectionHandle::new(tx))
            .run()
            .await;

        // then (期待する結果):
        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["action"], "connect");
        assert_eq!(events[0]["admin"], "alice");
        assert_eq!(events[0]["archive"], "");
        assert_eq!(events[1]["action"], "join");
        assert!(registry.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_room_name_closes_with_interrupt() {
        // テスト項目: 不正なルーム名では interrupt のみが送られ、以降の入力は読まれない
        // given (前提条件):
        let (registry, state) = create_state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let inbound = stream::iter(vec![
            text(r#"{"user":"alice","chat_name":"ab"}"#),
            text("never read"),
        ]);

        // when (操作):
        ConnectionSession::new(state, inbound, ConnectionHandle::new(tx))
            .run()
            .await;

        // then (期待する結果):
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["action"], "interrupt");
        assert_eq!(
            events[0]["message"],
            "The length of the chat name (ab) must be between 3 and 8 characters."
        );
        assert!(registry.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_join_request_closes_silently() {
        // テスト項目: JSON でない最初のメッセージでは何も送らずに終了する
        // given (前提条件):
        let (registry, state) = create_state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let inbound = stream::iter(vec![text("hello")]);

        // when (操作):
        ConnectionSession::new(state, inbound, ConnectionHandle::new(tx))
            .run()
            .await;

        // then (期待する結果):
        assert!(drain(&mut rx).is_empty());
        assert!(registry.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_kick_command_is_not_archived() {
        // テスト項目: キックコマンドはチャット本文として扱われず、管理者以外のキックは無効
        // given (前提条件):
        let (registry, state) = create_state();
        let (bob_tx, _bob_rx) = mpsc::unbounded_channel();
        let bob = state
            .join_room_usecase
            .execute("bob".to_string(), "abc".to_string(), ConnectionHandle::new(bob_tx))
            .await
            .unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let inbound = stream::iter(vec![
            text(r#"{"user":"alice","chat_name":"abc"}"#),
            text(r#"{"chat_name":"abc","user":"alice","kick_user":"bob"}"#),
        ]);

        // when (操作):
        ConnectionSession::new(state, inbound, ConnectionHandle::new(tx))
            .run()
            .await;

        // then (期待する結果):
        let room = registry.find_room("abc").await.unwrap();
        assert_eq!(room.admin, bob.member);
        assert!(room.archive.is_empty());
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.members[0].name, bob.member);
    }
}
