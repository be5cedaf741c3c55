use std::sync::Arc;

use tracing::info;

use super::deliver::channels_named;
use crate::ai::PromptInvoker;
use crate::discord::ChatGateway;
use crate::errors::BotError;
use crate::prompt::QUOTE_PROMPT;

/// Model-written Messi quote posted as an embed with a fixed picture.
pub struct QuoteCard {
    invoker: PromptInvoker,
    chat: Arc<dyn ChatGateway>,
    image_url: String,
}

impl QuoteCard {
    pub fn new(invoker: PromptInvoker, chat: Arc<dyn ChatGateway>, image_url: String) -> Self {
        Self {
            invoker,
            chat,
            image_url,
        }
    }

    pub async fn generate(&self) -> Result<String, BotError> {
        self.invoker.invoke(&QUOTE_PROMPT, &[]).await
    }

    /// Generate a fresh quote and post it to one channel.
    pub async fn post(&self, channel_id: u64) -> Result<(), BotError> {
        let quote = self.generate().await?;
        self.chat
            .send_embed(channel_id, &quote, &self.image_url)
            .await?;
        Ok(())
    }

    /// Generate one quote and post it to the channel called `name` in every guild.
    pub async fn post_to_named(&self, name: &str) -> Result<usize, BotError> {
        let channels = channels_named(self.chat.as_ref(), name).await?;
        if channels.is_empty() {
            info!("No #{} channel in any guild, skipping quote", name);
            return Ok(0);
        }

        let quote = self.generate().await?;
        for channel in &channels {
            self.chat
                .send_embed(channel.id, &quote, &self.image_url)
                .await?;
        }

        info!("Posted quote to {} #{} channel(s)", channels.len(), name);
        Ok(channels.len())
    }
}
