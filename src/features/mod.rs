pub mod commands;
pub mod deliver;
pub mod moderate;
pub mod quote;
pub mod summarize;

pub use commands::{Command, CommandDispatcher};
pub use moderate::{ModerationOutcome, Moderator};
pub use quote::QuoteCard;
pub use summarize::NewsSummarizer;
