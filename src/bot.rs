//! The bot core: composes the flows and exposes the two gateway entry points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::ai::{LanguageModel, PromptInvoker};
use crate::core::config::AppConfig;
use crate::core::models::IncomingMessage;
use crate::discord::ChatGateway;
use crate::errors::BotError;
use crate::features::{CommandDispatcher, Moderator, NewsSummarizer, QuoteCard};
use crate::youtube::{TranscriptSource, VideoPlatform};

pub struct Bot {
    moderator: Moderator,
    commands: CommandDispatcher,
    summarizer: Arc<NewsSummarizer>,
    quotes: Arc<QuoteCard>,
    quote_channel_name: String,
    summary_period: Duration,
    periodic_claimed: AtomicBool,
    periodic: Mutex<Option<JoinHandle<()>>>,
}

impl Bot {
    pub fn new(
        config: &AppConfig,
        chat: Arc<dyn ChatGateway>,
        model: Arc<dyn LanguageModel>,
        videos: Arc<dyn VideoPlatform>,
        transcripts: Arc<dyn TranscriptSource>,
    ) -> Self {
        let invoker = PromptInvoker::new(model);

        let quotes = Arc::new(QuoteCard::new(
            invoker.clone(),
            Arc::clone(&chat),
            config.quote_image_url.clone(),
        ));
        let summarizer = Arc::new(NewsSummarizer::new(
            config.youtube_channel.clone(),
            config.summary_channel_name.clone(),
            videos,
            transcripts,
            invoker.clone(),
            Arc::clone(&chat),
        ));

        Self {
            moderator: Moderator::new(invoker, Arc::clone(&chat), Arc::clone(&quotes)),
            commands: CommandDispatcher::new(
                config.command_prefix.clone(),
                chat,
                Arc::clone(&summarizer),
            ),
            summarizer,
            quotes,
            quote_channel_name: config.quote_channel_name.clone(),
            summary_period: config.summary_period,
            periodic_claimed: AtomicBool::new(false),
            periodic: Mutex::new(None),
        }
    }

    pub fn summarizer(&self) -> &Arc<NewsSummarizer> {
        &self.summarizer
    }

    /// Startup sequence, run each time the gateway session becomes ready:
    /// post a quote, then (first time only, and only if the destination
    /// channel exists) summarize once and start the timer.
    pub async fn on_ready(&self) -> Result<(), BotError> {
        if let Err(e) = self.quotes.post_to_named(&self.quote_channel_name).await {
            warn!("Startup quote failed: {}", e);
        }

        if self.periodic_claimed.load(Ordering::SeqCst) {
            debug!("Periodic summarization already running");
            return Ok(());
        }

        if !self.summarizer.has_destination().await? {
            info!(
                "No #{} channel found, summarization not started",
                self.summarizer.destination()
            );
            return Ok(());
        }

        if self
            .periodic_claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        let initial = self.summarizer.summarize_latest_video().await;

        let handle = self.summarizer.spawn_periodic(self.summary_period);
        if let Ok(mut slot) = self.periodic.lock() {
            *slot = Some(handle);
        }

        initial.map(|_| ())
    }

    /// Moderate a guild message, then give it to the command dispatcher.
    ///
    /// Own and direct messages are dropped before any model call.
    pub async fn on_message(&self, msg: &IncomingMessage) -> Result<(), BotError> {
        if msg.from_self || msg.is_direct() {
            return Ok(());
        }

        let outcome = self.moderator.moderate(msg).await?;
        debug!("Message {} moderated: {:?}", msg.id, outcome);

        self.commands.dispatch(msg).await?;
        Ok(())
    }

    /// Stop the periodic timer, if it was started.
    pub fn shutdown(&self) {
        match self.periodic.lock() {
            Ok(mut slot) => {
                if let Some(handle) = slot.take() {
                    handle.abort();
                    info!("Periodic summarization stopped");
                }
            }
            Err(e) => error!("Periodic task handle poisoned: {}", e),
        }
    }
}
