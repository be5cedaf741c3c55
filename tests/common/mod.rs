//! In-memory stand-ins for the bot's external collaborators.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use messiah_bot::ai::LanguageModel;
use messiah_bot::bot::Bot;
use messiah_bot::core::config::AppConfig;
use messiah_bot::core::models::{CaptionEntry, IncomingMessage, TextChannel};
use messiah_bot::discord::ChatGateway;
use messiah_bot::errors::{BotError, ChatError};
use messiah_bot::youtube::{TranscriptSource, VideoPlatform};

pub const IMAGE_URL: &str = "https://example.com/messi.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Text { channel_id: u64, text: String },
    Embed { channel_id: u64, description: String, image_url: String },
    Fetch { channel_id: u64, message_id: u64 },
    Delete { channel_id: u64, message_id: u64 },
}

#[derive(Default)]
pub struct MockChat {
    pub guilds: Vec<(u64, Vec<TextChannel>)>,
    pub fetch_error: Option<ChatError>,
    pub delete_error: Option<ChatError>,
    /// Guilds whose channel listing fails with the given error.
    pub channel_errors: HashMap<u64, ChatError>,
    pub calls: Mutex<Vec<ChatCall>>,
}

impl MockChat {
    pub fn with_guild(mut self, guild_id: u64, channels: &[(u64, &str)]) -> Self {
        let channels = channels
            .iter()
            .map(|(id, name)| TextChannel {
                id: *id,
                guild_id,
                name: name.to_string(),
            })
            .collect();
        self.guilds.push((guild_id, channels));
        self
    }

    pub fn with_unreadable_guild(mut self, guild_id: u64, error: ChatError) -> Self {
        self.guilds.push((guild_id, Vec::new()));
        self.channel_errors.insert(guild_id, error);
        self
    }

    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ChatCall::Text { channel_id, text } => Some((channel_id, text)),
                _ => None,
            })
            .collect()
    }

    pub fn embeds(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ChatCall::Embed {
                    channel_id,
                    description,
                    ..
                } => Some((channel_id, description)),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ChatCall::Delete { .. }))
            .count()
    }

    fn record(&self, call: ChatCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatGateway for MockChat {
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), ChatError> {
        self.record(ChatCall::Text {
            channel_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_embed(
        &self,
        channel_id: u64,
        description: &str,
        image_url: &str,
    ) -> Result<(), ChatError> {
        self.record(ChatCall::Embed {
            channel_id,
            description: description.to_string(),
            image_url: image_url.to_string(),
        });
        Ok(())
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<(), ChatError> {
        self.record(ChatCall::Fetch {
            channel_id,
            message_id,
        });
        match &self.fetch_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), ChatError> {
        self.record(ChatCall::Delete {
            channel_id,
            message_id,
        });
        match &self.delete_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn guilds(&self) -> Result<Vec<u64>, ChatError> {
        Ok(self.guilds.iter().map(|(id, _)| *id).collect())
    }

    async fn text_channels(&self, guild_id: u64) -> Result<Vec<TextChannel>, ChatError> {
        if let Some(e) = self.channel_errors.get(&guild_id) {
            return Err(e.clone());
        }
        self.guilds
            .iter()
            .find(|(id, _)| *id == guild_id)
            .map(|(_, channels)| channels.clone())
            .ok_or(ChatError::NotFound)
    }
}

/// Answers by prompt kind: the classifier gets `verdict`, the quote prompt a
/// fixed quote and the summary prompt a fixed bullet list.
pub struct MockModel {
    pub verdict: String,
    pub delay: Duration,
    pub fail: bool,
    pub prompts: Mutex<Vec<String>>,
}

pub const QUOTE: &str = "'He is the best player in the world by a distance.' - Pep Guardiola";
pub const SUMMARY: &str = "- Here we go!\n- Deal agreed";

impl MockModel {
    pub fn answering(verdict: &str) -> Self {
        Self {
            verdict: verdict.to_string(),
            delay: Duration::ZERO,
            fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::answering("0")
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, prompt: &str) -> Result<String, BotError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(BotError::HttpError("connection reset".to_string()));
        }

        if prompt.contains("Analyze the following message") {
            Ok(self.verdict.clone())
        } else if prompt.contains("Give a real quote") {
            Ok(QUOTE.to_string())
        } else if prompt.contains("Summarize the following transcript") {
            Ok(SUMMARY.to_string())
        } else {
            Err(BotError::LlmError("No text in response".to_string()))
        }
    }
}

#[derive(Default)]
pub struct MockVideos {
    pub channels: HashMap<String, String>,
    pub latest: HashMap<String, String>,
    pub lookups: AtomicUsize,
}

impl MockVideos {
    pub fn with_latest(handle: &str, channel_id: &str, video_id: &str) -> Self {
        let mut videos = Self::default();
        videos.channels.insert(handle.to_string(), channel_id.to_string());
        videos
            .latest
            .insert(channel_id.to_string(), video_id.to_string());
        videos
    }
}

#[async_trait]
impl VideoPlatform for MockVideos {
    async fn search_channel_id(&self, query: &str) -> Result<String, BotError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.channels
            .get(query)
            .cloned()
            .ok_or_else(|| BotError::LookupError(format!("No YouTube channel found for '{query}'")))
    }

    async fn latest_video_id(&self, channel_id: &str) -> Result<String, BotError> {
        self.latest
            .get(channel_id)
            .cloned()
            .ok_or_else(|| BotError::LookupError(format!("No videos found for channel {channel_id}")))
    }
}

#[derive(Default)]
pub struct MockTranscripts {
    pub captions: HashMap<String, Vec<CaptionEntry>>,
}

impl MockTranscripts {
    pub fn with(video_id: &str, lines: &[&str]) -> Self {
        let mut transcripts = Self::default();
        transcripts.captions.insert(
            video_id.to_string(),
            lines
                .iter()
                .enumerate()
                .map(|(i, text)| CaptionEntry::new(*text, i as f64))
                .collect(),
        );
        transcripts
    }
}

#[async_trait]
impl TranscriptSource for MockTranscripts {
    async fn fetch_captions(&self, video_id: &str) -> Result<Vec<CaptionEntry>, BotError> {
        self.captions
            .get(video_id)
            .cloned()
            .ok_or_else(|| BotError::TranscriptError(format!("{video_id}: transcripts disabled")))
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "DISCORD_BOT_TOKEN" => Some("token".to_string()),
        "GROQ_API_KEY" => Some("groq".to_string()),
        "YOUTUBE_API_KEY" => Some("yt".to_string()),
        "QUOTE_IMAGE_URL" => Some(IMAGE_URL.to_string()),
        _ => None,
    })
    .expect("test config")
}

pub struct Harness {
    pub bot: Arc<Bot>,
    pub chat: Arc<MockChat>,
    pub model: Arc<MockModel>,
    pub videos: Arc<MockVideos>,
}

pub fn harness(chat: MockChat, model: MockModel) -> Harness {
    let chat = Arc::new(chat);
    let model = Arc::new(model);
    let videos = Arc::new(MockVideos::with_latest("FabrizioRomanoYT", "UC123", "vid1"));
    let transcripts = Arc::new(MockTranscripts::with("vid1", &["Hello", "world"]));

    let bot = Arc::new(Bot::new(
        &test_config(),
        chat.clone(),
        model.clone(),
        videos.clone(),
        transcripts,
    ));

    Harness {
        bot,
        chat,
        model,
        videos,
    }
}

pub fn guild_message(id: u64, channel_id: u64, content: &str) -> IncomingMessage {
    IncomingMessage {
        id,
        channel_id,
        guild_id: Some(1),
        author_id: 42,
        from_self: false,
        content: content.to_string(),
    }
}
