//! Utilities shared by the Roomchat server and client binaries.

pub mod logger;
pub mod time;
