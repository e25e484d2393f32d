//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    error::ClientError,
    session::{JoinTarget, run_client_session},
    ui::spawn_readline,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client, reconnecting after transport failures
///
/// # Errors
///
/// * [`ClientError::Interrupted`] when the server refuses the join or kicks
///   this member; never retried
/// * [`ClientError::Connection`] after the last reconnect attempt fails
pub async fn run_client(url: String, name: String, room: String) -> Result<(), ClientError> {
    let target = JoinTarget { url, name, room };
    let mut input_rx = spawn_readline(target.prompt());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to join '{}' at {} as '{}' (attempt {}/{})",
            target.room,
            target.url,
            target.name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&target, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                tracing::warn!("{}", e);
                reconnect_count += 1;

                if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
