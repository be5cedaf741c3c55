use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::deliver::{channels_named, send_text_to_channels};
use crate::ai::PromptInvoker;
use crate::core::models::{ChannelReference, Transcript};
use crate::discord::ChatGateway;
use crate::errors::BotError;
use crate::prompt::SUMMARY_PROMPT;
use crate::youtube::{TranscriptSource, VideoPlatform};

/// Latest-video summarizer for one YouTube channel.
///
/// Holds no per-run state: overlapping runs (timer and manual command) are
/// independent and may both post.
pub struct NewsSummarizer {
    channel: ChannelReference,
    destination: String,
    videos: Arc<dyn VideoPlatform>,
    transcripts: Arc<dyn TranscriptSource>,
    invoker: PromptInvoker,
    chat: Arc<dyn ChatGateway>,
}

impl NewsSummarizer {
    pub fn new(
        channel: ChannelReference,
        destination: String,
        videos: Arc<dyn VideoPlatform>,
        transcripts: Arc<dyn TranscriptSource>,
        invoker: PromptInvoker,
        chat: Arc<dyn ChatGateway>,
    ) -> Self {
        Self {
            channel,
            destination,
            videos,
            transcripts,
            invoker,
            chat,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether any guild currently has a channel named like the destination.
    pub async fn has_destination(&self) -> Result<bool, BotError> {
        Ok(!channels_named(self.chat.as_ref(), &self.destination)
            .await?
            .is_empty())
    }

    pub async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, BotError> {
        let entries = self.transcripts.fetch_captions(video_id).await?;
        let transcript = Transcript::from_entries(&entries);
        if transcript.is_empty() {
            return Err(BotError::LookupError(format!(
                "Transcript for video {video_id} is empty"
            )));
        }
        info!(
            "Fetched transcript for {} ({} entries, {} chars)",
            video_id,
            entries.len(),
            transcript.as_str().len()
        );
        Ok(transcript)
    }

    pub async fn summarize_transcript(&self, transcript: &Transcript) -> Result<String, BotError> {
        self.invoker
            .invoke(&SUMMARY_PROMPT, &[("transcript", transcript.as_str())])
            .await
    }

    /// One full pipeline run; returns the number of channels posted to.
    pub async fn summarize_latest_video(&self) -> Result<usize, BotError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("summarize", %run_id, channel = self.channel.as_str());

        async {
            let channel_id = self.videos.search_channel_id(self.channel.as_str()).await?;
            let video_id = self.videos.latest_video_id(&channel_id).await?;
            let transcript = self.fetch_transcript(&video_id).await?;
            let summary = self.summarize_transcript(&transcript).await?;

            let destinations = channels_named(self.chat.as_ref(), &self.destination).await?;
            let posted = send_text_to_channels(self.chat.as_ref(), &destinations, &summary).await?;

            info!(
                "Summary of video {} posted to {} #{} channel(s)",
                video_id, posted, self.destination
            );
            Ok::<usize, BotError>(posted)
        }
        .instrument(span)
        .await
    }

    /// Re-run the pipeline every `period`, starting one period from now.
    ///
    /// A failed run is logged and the timer keeps going. A period too long
    /// to schedule is logged and no timer runs.
    pub fn spawn_periodic(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let summarizer = Arc::clone(self);
        tokio::spawn(async move {
            let Some(first_tick) = Instant::now().checked_add(period) else {
                error!("Summary period {:?} is out of range, periodic summarization disabled", period);
                return;
            };
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!("Periodic summarization every {:?}", period);
            loop {
                ticker.tick().await;
                if let Err(e) = summarizer.summarize_latest_video().await {
                    error!("Periodic summarization failed: {}", e);
                }
            }
        })
    }
}
