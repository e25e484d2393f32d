//! One connection to the chat server, from join request to close.

use futures_util::{SinkExt, StreamExt};
use roomchat_server::infrastructure::dto::websocket::{JoinRequest, KickRequest, ServerEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{
    command::InputCommand, error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt,
};

/// Identity the client joins with.
#[derive(Debug, Clone)]
pub struct JoinTarget {
    pub url: String,
    pub name: String,
    pub room: String,
}

impl JoinTarget {
    pub fn prompt(&self) -> String {
        format!("{}@{}> ", self.name, self.room)
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, ClientError> {
    serde_json::to_string(value).map_err(|e| ClientError::Encode(e.to_string()))
}

/// Run one session
///
/// # Returns
///
/// * `Ok(())` - the user quit
/// * `Err(ClientError::Interrupted)` - the server sent `interrupt`
/// * `Err(ClientError::Connection)` - the transport failed
pub async fn run_client_session(
    target: &JoinTarget,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(target.url.as_str())
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;
    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    let join = encode(&JoinRequest {
        user: target.name.clone(),
        chat_name: target.room.clone(),
    })?;
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;

    let prompt = target.prompt();
    println!(
        "\nJoining '{}' as '{}'. Type messages and press Enter to send. /quit to exit.\n",
        target.room, target.name
    );

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let event = match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Unrecognized message from server: {}", e);
                            continue;
                        }
                    };
                    print!("{}", MessageFormatter::format_event(&event, &target.name));
                    if let ServerEvent::Interrupt { message, .. } = event {
                        return Err(ClientError::Interrupted(message));
                    }
                    redisplay_prompt(&prompt);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::Connection("Connection lost".to_string()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::Connection(e.to_string()));
                }
            },
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // 入力が閉じられた（Ctrl+C / Ctrl+D）
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                };
                let outbound = match InputCommand::parse(&line) {
                    Ok(InputCommand::Quit) => {
                        write.send(Message::Close(None)).await.ok();
                        return Ok(());
                    }
                    Ok(InputCommand::Kick(kick_user)) => encode(&KickRequest {
                        chat_name: target.room.clone(),
                        user: target.name.clone(),
                        kick_user,
                    })?,
                    Ok(InputCommand::Text(text)) => text,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(&prompt);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(outbound.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    return Err(ClientError::Connection(e.to_string()));
                }
            }
        }
    }
}
