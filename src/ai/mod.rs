//! All AI/LLM functionality

pub mod client;
pub mod invoke;

// Re-export main types for convenience
pub use client::{LanguageModel, LlmClient, estimate_tokens};
pub use invoke::PromptInvoker;
