//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::ConnectionHandle,
    ui::{session::ConnectionSession, state::AppState},
};

use super::http::landing_page;

/// How long a closing connection may take to flush its queued events.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// `GET /`: WebSocket upgrade, or the landing page for ordinary requests.
pub async fn root_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| handle_socket(socket, state)),
        Err(_) => landing_page().into_response(),
    }
}

/// Spawns a task that drains the connection's outbound queue into the socket.
///
/// The task ends once every `ConnectionHandle` for the queue has been dropped
/// and the queue is empty, then closes the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("Socket closed while sending: {}", e);
                return;
            }
        }
        if let Err(e) = sender.close().await {
            tracing::debug!("Failed to close socket: {}", e);
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let connection = ConnectionHandle::new(tx);
    let connection_id = connection.id;
    tracing::debug!("Connection '{}' opened", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    ConnectionSession::new(state, receiver, connection).run().await;

    // セッションが保持していたハンドルはすべて解放済み。残りのイベントを送り切るまで待つ
    match tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut send_task).await {
        Ok(Ok(())) => tracing::debug!("Connection '{}' closed", connection_id),
        Ok(Err(e)) => tracing::error!("Writer task for '{}' failed: {}", connection_id, e),
        Err(_) => {
            tracing::warn!(
                "Connection '{}' did not flush within {:?}",
                connection_id,
                WRITER_DRAIN_TIMEOUT
            );
            send_task.abort();
        }
    }
}
