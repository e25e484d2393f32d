//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomRegistry, RoomSnapshot};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 全ルームのスナップショットを名前順で返す
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        self.registry.list_rooms().await
    }
}
