use std::sync::Arc;

use tracing::{info, warn};

use super::quote::QuoteCard;
use crate::ai::PromptInvoker;
use crate::core::models::{IncomingMessage, Verdict};
use crate::discord::ChatGateway;
use crate::errors::BotError;
use crate::prompt::{MODERATION_NOTICE, MODERATION_PROMPT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationOutcome {
    Kept,
    Deleted,
}

/// Classifies guild messages and removes the ones the model flags.
pub struct Moderator {
    invoker: PromptInvoker,
    chat: Arc<dyn ChatGateway>,
    quotes: Arc<QuoteCard>,
}

impl Moderator {
    pub fn new(invoker: PromptInvoker, chat: Arc<dyn ChatGateway>, quotes: Arc<QuoteCard>) -> Self {
        Self {
            invoker,
            chat,
            quotes,
        }
    }

    pub async fn classify(&self, content: &str) -> Result<Verdict, BotError> {
        let answer = self
            .invoker
            .invoke(&MODERATION_PROMPT, &[("message_content", content)])
            .await?;

        if Verdict::try_parse(&answer).is_none() {
            warn!("Unexpected classifier answer {:?}, keeping message", answer);
        }
        Ok(Verdict::parse(&answer))
    }

    /// Delete-and-notify on a positive verdict.
    ///
    /// A failed deletion aborts the remaining steps and is returned to the
    /// caller; nothing is posted in that case.
    pub async fn moderate(&self, msg: &IncomingMessage) -> Result<ModerationOutcome, BotError> {
        match self.classify(&msg.content).await? {
            Verdict::Keep => Ok(ModerationOutcome::Kept),
            Verdict::Delete => {
                self.chat.delete_message(msg.channel_id, msg.id).await?;
                info!(
                    "Deleted message {} from user {} in channel {}",
                    msg.id, msg.author_id, msg.channel_id
                );

                self.chat
                    .send_text(msg.channel_id, MODERATION_NOTICE)
                    .await?;
                self.quotes.post(msg.channel_id).await?;

                Ok(ModerationOutcome::Deleted)
            }
        }
    }
}
