//! MessagePusher trait: delivery of events to connections.
//!
//! The domain decides who receives what; implementations decide how the
//! event is encoded and written.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{entity::ConnectionHandle, error::MessagePushError, event::RoomEvent};

/// Outbound queue of one connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Push `event` to a single connection.
    async fn push_to(
        &self,
        target: &ConnectionHandle,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// Push `event` to every target, in order.
    ///
    /// A failure for one target is logged and does not stop delivery to the
    /// rest; only an encoding failure is returned.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionHandle>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
