//! メッセージ送信（通知）の実装
//!
//! - `websocket`: WebSocket 接続の送信キューに JSON を積む実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
