//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RegistryError, RoomRegistry, RoomSnapshot};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_name: &str) -> Result<RoomSnapshot, GetRoomDetailError> {
        self.registry
            .find_room(room_name)
            .await
            .map_err(|RegistryError::RoomNotFound(_)| GetRoomDetailError::RoomNotFound)
    }
}
