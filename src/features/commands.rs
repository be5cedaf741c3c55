//! Prefix commands: `delete <message_id>` and `transfer_news`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::summarize::NewsSummarizer;
use crate::core::models::IncomingMessage;
use crate::discord::ChatGateway;
use crate::errors::{BotError, ChatError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Delete { message_id: u64 },
    TransferNews,
}

/// Parse a message into a command.
///
/// `Ok(None)` means the message is not addressed to the bot or names an
/// unknown command. Bad arguments are an error.
pub fn parse_command(prefix: &str, content: &str) -> Result<Option<Command>, BotError> {
    let Some(rest) = content.strip_prefix(prefix) else {
        return Ok(None);
    };

    let mut parts = rest.split_whitespace();
    let name = match rest.chars().next() {
        Some(c) if !c.is_whitespace() => parts.next(),
        _ => None,
    };

    match name {
        Some("delete") => {
            let raw = parts.next().ok_or_else(|| {
                BotError::CommandError("delete: missing required argument message_id".to_string())
            })?;
            let message_id = raw.parse::<u64>().map_err(|_| {
                BotError::CommandError(format!("delete: '{raw}' is not a message id"))
            })?;
            Ok(Some(Command::Delete { message_id }))
        }
        Some("transfer_news") => Ok(Some(Command::TransferNews)),
        Some(other) => {
            debug!("Ignoring unknown command '{}'", other);
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Reply text for a `delete` attempt.
pub fn delete_reply(message_id: u64, result: &Result<(), ChatError>) -> String {
    match result {
        Ok(()) => format!("Message {message_id} deleted."),
        Err(ChatError::NotFound) => format!("Message {message_id} not found."),
        Err(ChatError::Forbidden) => "I do not have permission to delete messages.".to_string(),
        Err(ChatError::Transport(e)) => format!("Failed to delete message: {e}"),
    }
}

pub struct CommandDispatcher {
    prefix: String,
    chat: Arc<dyn ChatGateway>,
    summarizer: Arc<NewsSummarizer>,
}

impl CommandDispatcher {
    pub fn new(prefix: String, chat: Arc<dyn ChatGateway>, summarizer: Arc<NewsSummarizer>) -> Self {
        Self {
            prefix,
            chat,
            summarizer,
        }
    }

    pub async fn dispatch(&self, msg: &IncomingMessage) -> Result<Option<Command>, BotError> {
        let command = match parse_command(&self.prefix, &msg.content) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!("Rejected command in channel {}: {}", msg.channel_id, e);
                return Ok(None);
            }
        };

        info!("Running {:?} for user {}", command, msg.author_id);
        match command {
            Command::Delete { message_id } => self.delete(msg.channel_id, message_id).await?,
            Command::TransferNews => {
                self.summarizer.summarize_latest_video().await?;
            }
        }
        Ok(Some(command))
    }

    /// Fetch then delete a message in the invoking channel, reporting the
    /// outcome there. Only the final reply can fail this call.
    pub async fn delete(&self, channel_id: u64, message_id: u64) -> Result<(), BotError> {
        let result = match self.chat.fetch_message(channel_id, message_id).await {
            Ok(()) => self.chat.delete_message(channel_id, message_id).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!("delete {} in channel {} failed: {}", message_id, channel_id, e);
        }

        self.chat
            .send_text(channel_id, &delete_reply(message_id, &result))
            .await?;
        Ok(())
    }
}
