//! In-memory registry.

pub mod registry;

pub use registry::InMemoryRoomRegistry;
