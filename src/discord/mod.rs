//! All Discord-specific functionality

pub mod client;
pub mod handler;

// Re-export main types for convenience
pub use client::{ChatGateway, SerenityGateway};
pub use handler::{BotKey, Handler};
